//! CLI runner for interactive and single-prompt modes.

use crate::cli::repl::Repl;
use crate::config::Settings;

/// Run a single prompt and exit.
pub async fn run_single_prompt(settings: &Settings, prompt: &str) -> anyhow::Result<()> {
    let mut repl = Repl::new(settings);
    repl.handle_prompt(prompt).await;
    repl.shutdown().await;
    Ok(())
}

/// Run in interactive mode.
pub async fn run_interactive(settings: &Settings) -> anyhow::Result<()> {
    print_banner(&settings.model);

    let repl = Repl::new(settings);
    repl.run().await
}

/// Print the welcome banner.
pub fn print_banner(model: &str) {
    println!();
    println!(
        "  \x1b[1;36mquip\x1b[0m \x1b[2mv{}\x1b[0m  \x1b[2m· {}\x1b[0m",
        env!("CARGO_PKG_VERSION"),
        model
    );
    println!();
    println!("  \x1b[2mChat with an LLM from your terminal.\x1b[0m");
    println!("  \x1b[2mType \x1b[0m\x1b[1;36m/help\x1b[0m\x1b[2m for commands, or just start typing.\x1b[0m");
    println!();
}

/// Get the application version string.
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Banner text without ANSI codes (for testing).
pub fn banner_text_lines() -> Vec<&'static str> {
    vec![
        "quip",
        "Chat with an LLM from your terminal.",
        "/help",
    ]
}

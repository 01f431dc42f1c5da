//! Quip - chat with an LLM from your terminal.

#![allow(dead_code)]
#![allow(unused_imports)]

mod chat;
mod cli;
mod client;
mod config;
mod controller;
mod messaging;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Settings, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

/// Quip - chat with an LLM from your terminal
#[derive(Parser, Debug)]
#[command(name = "quip")]
#[command(version, about, long_about = None)]
struct Args {
    /// Execute a single prompt and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Endpoint base URL (OpenAI-compatible)
    #[arg(long, env = "QUIP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Model identifier sent with every request
    #[arg(short, long, env = "QUIP_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// API key for the Authorization header (empty = no auth)
    #[arg(long, env = "QUIP_API_KEY", hide_env_values = true, default_value = "")]
    api_key: String,

    /// Per-reply token cap
    #[arg(long, env = "QUIP_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Enable debug logging (equivalent to RUST_LOG=debug)
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose logging (equivalent to RUST_LOG=trace)
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        // Determine log level from args or env
        let default_filter = if args.verbose {
            "trace"
        } else if args.debug {
            "debug"
        } else {
            "warn" // Quiet by default for normal use
        };

        // Initialize tracing with stderr output
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();

        if args.debug || args.verbose {
            tracing::info!("Debug logging enabled");
        }

        let settings = Settings::new(&args.base_url, &args.model, &args.api_key, args.max_tokens);

        if let Some(prompt) = args.prompt {
            cli::runner::run_single_prompt(&settings, &prompt).await?;
        } else {
            cli::runner::run_interactive(&settings).await?;
        }

        Ok(())
    })
}

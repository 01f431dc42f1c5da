//! Interactive REPL.
//!
//! Reads lines with reedline, dispatches slash commands, and hands
//! everything else to the turn controller as a chat submission. Rendering
//! happens on a spawned task subscribed to the message bus, so the user
//! turn appears immediately and the spinner runs while the request is in
//! flight.

use reedline::{FileBackedHistory, Signal};
use tracing::debug;

use crate::cli::editor::{create_reedline, QuipCompleter, QuipPrompt, COMMANDS};
use crate::client::{CompletionBackend, CompletionClient};
use crate::config::{Settings, XdgDirs};
use crate::controller::{SubmitOutcome, TurnController};
use crate::messaging::{MessageBus, TerminalRenderer};

/// Result of handling a command.
pub enum CommandResult {
    /// Continue the REPL loop.
    Continue,
    /// Exit the REPL.
    Exit,
}

/// REPL state.
pub struct Repl {
    controller: TurnController,
    bus: MessageBus,
    render_task: tokio::task::JoinHandle<()>,
    model_name: String,
}

impl Repl {
    /// Create a REPL talking to the configured endpoint.
    pub fn new(settings: &Settings) -> Self {
        Self::with_backend(
            Box::new(CompletionClient::new(settings)),
            &settings.model,
        )
    }

    /// Create a REPL over any completion backend.
    pub fn with_backend(backend: Box<dyn CompletionBackend>, model_name: &str) -> Self {
        let bus = MessageBus::new();
        let controller = TurnController::new(backend, bus.sender());
        let receiver = bus.subscribe();
        let render_task = tokio::spawn(async move {
            TerminalRenderer::new().run_loop(receiver).await;
        });

        Self {
            controller,
            bus,
            render_task,
            model_name: model_name.to_string(),
        }
    }

    /// Run the REPL loop.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut line_editor = create_reedline(QuipCompleter::new());

        let history_path = XdgDirs::new().history_file();
        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(history) = FileBackedHistory::with_file(500, history_path) {
            line_editor = line_editor.with_history(Box::new(history));
        }

        loop {
            let prompt = QuipPrompt::new(&self.model_name);

            match line_editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    if trimmed.starts_with('/') {
                        match self.handle_command(trimmed) {
                            CommandResult::Continue => {}
                            CommandResult::Exit => break,
                        }
                    } else {
                        self.handle_prompt(&line).await;
                    }
                }
                Ok(Signal::CtrlC) => {
                    println!("^C");
                    continue;
                }
                Ok(Signal::CtrlD) => break,
                Err(err) => {
                    self.bus.sender().error(format!("Readline error: {}", err));
                    break;
                }
            }
        }

        println!("👋 See you around.");
        self.shutdown().await;
        Ok(())
    }

    /// Submit one chat message.
    pub async fn handle_prompt(&mut self, line: &str) {
        match self.controller.submit_text(line).await {
            SubmitOutcome::Busy => {
                self.bus
                    .sender()
                    .warning("Still thinking, give it a second.");
            }
            outcome => debug!(?outcome, "submission handled"),
        }
    }

    /// Handle a slash command.
    fn handle_command(&mut self, input: &str) -> CommandResult {
        let parts: Vec<&str> = input[1..].splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "help" | "h" | "?" => show_help(),
            "exit" | "quit" | "q" => return CommandResult::Exit,
            "clear" | "new" => {
                self.controller.reset();
                self.bus.sender().success("Started a new chat.");
            }
            other => {
                self.bus
                    .sender()
                    .warning(format!("Unknown command: /{}", other));
            }
        }

        CommandResult::Continue
    }

    /// Tear down: close the bus and let the render task drain.
    pub async fn shutdown(self) {
        let Self {
            controller,
            bus,
            render_task,
            ..
        } = self;
        drop(controller);
        drop(bus);
        let _ = render_task.await;
    }
}

/// Print the command list.
fn show_help() {
    println!();
    for (cmd, desc) in COMMANDS {
        println!("  \x1b[1;36m{:<8}\x1b[0m {}", cmd, desc);
    }
    println!();
    println!("  Anything else is sent to the model as a chat message.");
    println!();
}

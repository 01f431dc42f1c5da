//! Animated "Thinking…" spinner shown while a request is outstanding.

use crossterm::{
    cursor::{Hide, MoveToColumn, Show},
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use std::io::{stdout, Write};
use std::time::Duration;
use tokio::sync::watch;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner configuration.
#[derive(Clone)]
pub struct SpinnerConfig {
    /// Animation frames.
    pub frames: Vec<&'static str>,
    /// Frame duration in milliseconds.
    pub interval_ms: u64,
    /// Spinner color.
    pub color: Color,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            frames: SPINNER_FRAMES.to_vec(),
            interval_ms: 80,
            color: Color::Cyan,
        }
    }
}

/// A spinner handle for controlling the animation.
pub struct SpinnerHandle {
    stop_tx: watch::Sender<bool>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl SpinnerHandle {
    /// Stop the spinner and clear its line.
    pub async fn stop(mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        clear_line();
    }

    /// Stop the spinner synchronously (non-async).
    pub fn stop_sync(&mut self) {
        let _ = self.stop_tx.send(true);
        clear_line();
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(true);
        let mut stdout = stdout();
        let _ = stdout.execute(Show);
    }
}

fn clear_line() {
    let mut stdout = stdout();
    let _ = stdout.execute(MoveToColumn(0));
    let _ = stdout.execute(Clear(ClearType::CurrentLine));
    let _ = stdout.execute(Show);
}

/// Spinner for showing activity.
pub struct Spinner {
    config: SpinnerConfig,
}

impl Spinner {
    /// Create a new spinner with default config.
    pub fn new() -> Self {
        Self {
            config: SpinnerConfig::default(),
        }
    }

    /// Create with custom config.
    pub fn with_config(config: SpinnerConfig) -> Self {
        Self { config }
    }

    /// Start the spinner with a message.
    pub fn start(&self, message: impl Into<String>) -> SpinnerHandle {
        let config = self.config.clone();
        let message = message.into();
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut frame_idx = 0;
            let mut stdout = stdout();

            let _ = stdout.execute(Hide);

            loop {
                if *stop_rx.borrow() {
                    break;
                }

                let frame = config.frames[frame_idx % config.frames.len()];

                let _ = stdout.execute(MoveToColumn(0));
                let _ = stdout.execute(Clear(ClearType::CurrentLine));
                let _ = stdout.execute(SetForegroundColor(config.color));
                let _ = stdout.execute(Print(format!("{} {}", frame, message)));
                let _ = stdout.execute(ResetColor);
                let _ = stdout.flush();

                frame_idx += 1;

                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_millis(config.interval_ms)) => {}
                    _ = stop_rx.changed() => { break; }
                }
            }

            let _ = stdout.execute(Show);
        });

        SpinnerHandle {
            stop_tx,
            task: Some(task),
        }
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

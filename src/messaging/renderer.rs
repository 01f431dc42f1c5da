//! Terminal renderer for chat events.

use crossterm::{
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    ExecutableCommand,
};
use std::io::stdout;

use super::{Message, MessageLevel, MessageReceiver, Spinner};

/// Render style configuration.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub user_color: Color,
    pub assistant_color: Color,
    pub info_color: Color,
    pub success_color: Color,
    pub warning_color: Color,
    pub error_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            user_color: Color::Yellow,
            assistant_color: Color::Cyan,
            info_color: Color::White,
            success_color: Color::Green,
            warning_color: Color::Yellow,
            error_color: Color::Red,
        }
    }
}

/// Label shown on assistant turns.
const ASSISTANT_LABEL: &str = "Quip";

/// Label shown on user turns.
const USER_LABEL: &str = "You";

/// Renders chat events to the terminal, newest entry last.
pub struct TerminalRenderer {
    style: RenderStyle,
}

impl TerminalRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self {
            style: RenderStyle::default(),
        }
    }

    /// Create with custom style.
    pub fn with_style(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Render a single message.
    pub fn render(&self, message: &Message) -> std::io::Result<()> {
        match message {
            Message::Turn(turn) => self.render_turn(turn.is_user, &turn.timestamp, &turn.text),
            Message::Thinking(t) => self.render_thinking(t.active),
            Message::Text(text) => self.render_text(text.level, &text.text),
            Message::Clear => self.clear_screen(),
        }
    }

    fn render_turn(&self, is_user: bool, timestamp: &str, text: &str) -> std::io::Result<()> {
        let (label, color) = if is_user {
            (USER_LABEL, self.style.user_color)
        } else {
            (ASSISTANT_LABEL, self.style.assistant_color)
        };

        stdout()
            .execute(SetForegroundColor(color))?
            .execute(SetAttribute(Attribute::Bold))?
            .execute(Print(label))?
            .execute(SetAttribute(Attribute::Reset))?
            .execute(ResetColor)?
            .execute(SetAttribute(Attribute::Dim))?
            .execute(Print(format!(" [{}]\n", timestamp)))?
            .execute(SetAttribute(Attribute::Reset))?
            .execute(Print(text))?
            .execute(Print("\n\n"))?;

        Ok(())
    }

    /// Non-animated loading indicator; the run loop uses [`Spinner`] instead.
    fn render_thinking(&self, active: bool) -> std::io::Result<()> {
        if active {
            stdout()
                .execute(SetAttribute(Attribute::Dim))?
                .execute(Print("Thinking...\n"))?
                .execute(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    fn render_text(&self, level: MessageLevel, text: &str) -> std::io::Result<()> {
        let color = match level {
            MessageLevel::Info => self.style.info_color,
            MessageLevel::Success => self.style.success_color,
            MessageLevel::Warning => self.style.warning_color,
            MessageLevel::Error => self.style.error_color,
        };

        let prefix = match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Info => "",
        };

        stdout()
            .execute(SetForegroundColor(color))?
            .execute(Print(prefix))?
            .execute(Print(text))?
            .execute(Print("\n"))?
            .execute(ResetColor)?;

        Ok(())
    }

    fn clear_screen(&self) -> std::io::Result<()> {
        use crossterm::terminal::{Clear, ClearType};
        stdout().execute(Clear(ClearType::All))?;
        Ok(())
    }

    /// Run a render loop consuming messages from a receiver.
    ///
    /// Designed to be spawned as a task. Loading transitions drive an
    /// animated spinner; everything else renders in arrival order, which is
    /// append order.
    pub async fn run_loop(&self, mut receiver: MessageReceiver) {
        let spinner = Spinner::new();
        let mut spinner_handle = None;

        loop {
            match receiver.recv().await {
                Ok(Message::Thinking(t)) => {
                    if t.active {
                        if spinner_handle.is_none() {
                            spinner_handle = Some(spinner.start("Thinking..."));
                        }
                    } else if let Some(handle) = spinner_handle.take() {
                        handle.stop().await;
                    }
                }
                Ok(message) => {
                    let _ = self.render(&message);
                }
                Err(super::BusError::Lagged(n)) => {
                    tracing::warn!("renderer lagged behind by {} messages", n);
                }
                Err(super::BusError::Closed) => break,
            }
        }

        if let Some(handle) = spinner_handle.take() {
            handle.stop().await;
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

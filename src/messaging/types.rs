//! Event types flowing from the controller to the UI.

use serde::{Deserialize, Serialize};

use crate::chat::ChatTurn;

/// Notice levels for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A plain text notice (help hints, command feedback).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextMessage {
    pub level: MessageLevel,
    pub text: String,
}

/// Loading state transition. `active` is true from dispatch until the
/// response (or failure) has been appended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThinkingMessage {
    pub active: bool,
}

/// Any event type (for subscription and diagnostics).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// A turn was appended to the conversation.
    Turn(ChatTurn),
    /// The loading flag changed.
    Thinking(ThinkingMessage),
    /// A notice to display.
    Text(TextMessage),
    /// The session was reset; clear the display.
    Clear,
}

impl Message {
    /// Create a turn-appended event.
    pub fn turn(turn: ChatTurn) -> Self {
        Self::Turn(turn)
    }

    /// Create a loading transition event.
    pub fn thinking(active: bool) -> Self {
        Self::Thinking(ThinkingMessage { active })
    }

    /// Create an info notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self::Text(TextMessage {
            level: MessageLevel::Info,
            text: text.into(),
        })
    }

    /// Create a success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self::Text(TextMessage {
            level: MessageLevel::Success,
            text: text.into(),
        })
    }

    /// Create a warning notice.
    pub fn warning(text: impl Into<String>) -> Self {
        Self::Text(TextMessage {
            level: MessageLevel::Warning,
            text: text.into(),
        })
    }

    /// Create an error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self::Text(TextMessage {
            level: MessageLevel::Error,
            text: text.into(),
        })
    }
}

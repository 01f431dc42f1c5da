//! Chat session state: turns, the conversation transcript, and UI state.
//!
//! Everything here is plain owned data. The [`TurnController`](crate::controller)
//! is the only mutator; the rest of the application observes changes through
//! the message bus. Nothing is persisted: a session lives exactly as long as
//! the process.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// A single entry in the conversation transcript.
///
/// Turns are immutable once created. A user turn is created at submission
/// time with the raw input text; an assistant turn is created when the
/// response (or the fallback error reply) arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Display text of the turn.
    pub text: String,

    /// True for turns the user typed, false for assistant replies.
    pub is_user: bool,

    /// Wall-clock time-of-day when the turn was created (e.g. "14:32:05").
    pub timestamp: String,
}

impl ChatTurn {
    /// Create a user turn stamped with the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            timestamp: wall_clock_now(),
        }
    }

    /// Create an assistant turn stamped with the current time.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            timestamp: wall_clock_now(),
        }
    }
}

/// Current local time-of-day, formatted for display.
fn wall_clock_now() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Append-only ordered sequence of chat turns.
///
/// Insertion order is display order is chronological order. Entries are
/// never removed or reordered within a session; `clear` starts a fresh
/// session (the terminal analogue of a page reload).
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the end of the transcript.
    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The most recently appended turn.
    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    /// Number of turns in the transcript.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when no turns have been appended yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop the transcript and start over.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

/// UI-facing session state: the input box mirror and the loading flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUiState {
    /// Text currently staged in the input box.
    pub pending_input: String,

    /// True exactly while a completion request is outstanding.
    pub is_loading: bool,
}

/// Complete state for one chat session.
///
/// Owned by the controller; there are no shared mutable globals.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    /// The conversation transcript.
    pub conversation: Conversation,

    /// Input box and loading state.
    pub ui: SessionUiState,
}

impl ChatSession {
    /// Create a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to a fresh session: empty transcript, idle UI.
    pub fn reset(&mut self) {
        self.conversation.clear();
        self.ui = SessionUiState::default();
    }
}

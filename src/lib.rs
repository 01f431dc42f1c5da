//! Quip Library
//!
//! This crate provides the core functionality for the Quip CLI: a minimal
//! terminal chat client for OpenAI-compatible LLM endpoints.
//!
//! This library exposes many types for external consumers. The unused_imports
//! warning is suppressed because these are re-exports meant for library users.

#![allow(dead_code)] // Library APIs may not be used internally
#![allow(unused_imports)] // Re-exports for library consumers
//!
//! ## Main Components
//!
//! - [`chat`] - Session state (ChatTurn, Conversation, SessionUiState)
//! - [`controller`] - Turn controller state machine (submit lifecycle)
//! - [`client`] - Completion client (CompletionBackend, CompletionClient)
//! - [`messaging`] - Event bus, terminal renderer, spinner
//! - [`config`] - Settings and XDG paths
//! - [`cli`] - REPL, runner, reedline setup
//!
//! ## Quick Start
//!
//! ```ignore
//! use quip::{CompletionClient, MessageBus, Settings, TurnController};
//!
//! let settings = Settings::default();
//! let bus = MessageBus::new();
//! let client = CompletionClient::new(&settings);
//! let mut controller = TurnController::new(Box::new(client), bus.sender());
//! controller.submit_text("hello!").await;
//! ```

pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod messaging;

// Re-export commonly used types
pub use chat::{ChatSession, ChatTurn, Conversation, SessionUiState};
pub use cli::{create_reedline, QuipCompleter, QuipPrompt, Repl, COMMANDS};
pub use client::{CompletionBackend, CompletionClient, CompletionError};
pub use config::{Settings, XdgDirs};
pub use controller::{SubmitOutcome, TurnController, TurnState, FALLBACK_REPLY};
pub use messaging::{
    Message, MessageBus, MessageReceiver, MessageSender, Spinner, SpinnerHandle, TerminalRenderer,
};

//! Event-driven display layer.
//!
//! The controller never draws anything. It publishes [`Message`] values to
//! a [`MessageBus`]; views subscribe and render. The terminal front end
//! spawns [`TerminalRenderer::run_loop`] as a task, so turns appear as they
//! are appended and the spinner tracks the loading flag.
//!
//! ```text
//!   TurnController ──publish──▶ MessageBus ──broadcast──▶ TerminalRenderer
//! ```
//!
//! State changes and their display are decoupled on purpose: the session
//! state lives in [`crate::chat`], and anything (a test, an alternate UI)
//! can subscribe to the same bus.

mod bus;
mod renderer;
mod spinner;
mod types;

pub use bus::{BusError, MessageBus, MessageReceiver, MessageSender};
pub use renderer::{RenderStyle, TerminalRenderer};
pub use spinner::{Spinner, SpinnerConfig, SpinnerHandle};
pub use types::{Message, MessageLevel, TextMessage, ThinkingMessage};

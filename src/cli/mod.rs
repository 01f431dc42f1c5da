//! CLI components.

pub mod editor;
pub mod repl;
pub mod runner;

pub use editor::{create_reedline, QuipCompleter, QuipHighlighter, QuipPrompt, COMMANDS};
pub use repl::Repl;
pub use runner::{run_interactive, run_single_prompt};

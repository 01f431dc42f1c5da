//! Configuration: runtime settings and XDG paths.

pub mod settings;
pub mod xdg;

pub use settings::{Settings, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
pub use xdg::XdgDirs;

//! XDG Base Directory support.

use std::path::PathBuf;

/// XDG directory paths for Quip.
pub struct XdgDirs {
    /// State directory (~/.local/state/quip or XDG_STATE_HOME/quip).
    /// Holds the input-line history file.
    pub state: PathBuf,
}

impl XdgDirs {
    /// Get XDG directories, respecting environment variables.
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        Self {
            state: std::env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home.join(".local/state"))
                .join("quip"),
        }
    }

    /// Path of the reedline history file.
    pub fn history_file(&self) -> PathBuf {
        self.state.join("history.txt")
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

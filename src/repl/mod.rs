//! Interactive REPL for phone-forward
//!
//! Each submitted line is run as a command-language script against a
//! session-wide set of tries. A handful of meta commands (`help`, `tries`,
//! `rules`, `stats`, `use`, `exit`) inspect the session instead.

pub mod command;
pub mod helper;
pub mod highlighter;
pub mod state;
pub mod state_machine;

pub use command::{Command, CommandResult};
pub use helper::PhoneForwardHelper;
pub use state::ReplState;
pub use state_machine::{ReplEvent, ReplPhase, ReplStateMachine, Transition};

use crate::cli::paths::{default_history_path, PersistentConfig};
use std::path::PathBuf;

/// REPL configuration
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt name
    pub prompt: String,
    /// Continuation prompt for input inside an open comment
    pub continuation_prompt: String,
    /// History file path
    pub history_file: Option<PathBuf>,
    /// Maximum history entries
    pub max_history: usize,
    /// Print the banner at startup
    pub banner: bool,
}

impl ReplConfig {
    /// Build from a (merged) persistent configuration, falling back to
    /// defaults for unset fields.
    pub fn from_persistent(config: &PersistentConfig) -> Self {
        let defaults = Self::default();
        Self {
            history_file: config.history_file.clone().or(defaults.history_file),
            max_history: config.max_history.unwrap_or(defaults.max_history),
            banner: config.banner.unwrap_or(defaults.banner),
            ..defaults
        }
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "phfwd".to_string(),
            continuation_prompt: "...> ".to_string(),
            history_file: default_history_path(),
            max_history: 1000,
            banner: true,
        }
    }
}

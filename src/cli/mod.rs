//! CLI interface for phone-forward
//!
//! Batch script execution, parse-only checks and persistent settings.

pub mod args;
pub mod commands;
pub mod paths;

pub use args::{Cli, Commands};
pub use paths::{config_dir, default_history_path, PersistentConfig};

//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phfwd")]
#[command(about = "Phone number forwarding with prefix rewrite rules")]
#[command(version)]
pub struct Cli {
    /// Custom configuration file path
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Without a command, a script is read from standard input
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a script, printing results to stdout and the first error to stderr
    Run {
        /// Script file (standard input if omitted)
        file: Option<PathBuf>,
    },

    /// Parse a script without executing it
    Check {
        /// Script file (standard input if omitted)
        file: Option<PathBuf>,
    },

    /// Launch interactive REPL
    Repl {
        /// Trie to select at startup
        #[arg(short, long)]
        trie: Option<String>,

        /// History file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Do not print the startup banner
        #[arg(long)]
        no_banner: bool,
    },

    /// Show or update user settings
    Settings {
        /// Set the trie selected when the REPL starts
        #[arg(long)]
        set_default_trie: Option<String>,

        /// Set the REPL history file
        #[arg(long)]
        set_history_file: Option<PathBuf>,

        /// Set the maximum number of history entries
        #[arg(long)]
        set_max_history: Option<usize>,

        /// Enable or disable the startup banner
        #[arg(long)]
        set_banner: Option<bool>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

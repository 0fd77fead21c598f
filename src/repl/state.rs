//! REPL state management
//!
//! Owns the interpreter (and with it every trie of the session) plus the
//! configuration that is written back on exit.

use crate::cli::paths::PersistentConfig;
use crate::script::{Interpreter, ScriptError};
use anyhow::Result;
use std::fmt;
use std::path::PathBuf;

/// Session state shared by all REPL commands.
#[derive(Debug, Default)]
pub struct ReplState {
    /// Tries of the session and the current selection
    pub interpreter: Interpreter,
    /// Configuration loaded at startup
    pub config: PersistentConfig,
    /// Custom config file path (`None` for the default location)
    pub config_file_path: Option<PathBuf>,
}

impl ReplState {
    /// Create a new session with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a loaded configuration, selecting its default
    /// trie if one is set.
    pub fn with_config(config: PersistentConfig, config_file_path: Option<PathBuf>) -> Self {
        let mut interpreter = Interpreter::new();
        if let Some(id) = &config.default_trie {
            interpreter.select(id);
        }
        Self {
            interpreter,
            config,
            config_file_path,
        }
    }

    /// Run `source` as a script.
    ///
    /// The input is treated as newline-terminated, like a line of a file,
    /// so a trailing number completes its statement. Returns everything
    /// printed before the script finished or failed, together with the
    /// error, if any.
    pub fn run_script(&mut self, source: &str) -> Result<(String, Option<ScriptError>)> {
        let mut line = source.as_bytes().to_vec();
        if !line.ends_with(b"\n") {
            line.push(b'\n');
        }

        let mut out = Vec::new();
        let error = match self.interpreter.run(&line, &mut out) {
            Ok(_) => None,
            Err(ScriptError::Io(e)) => return Err(e.into()),
            Err(e) => Some(e),
        };
        Ok((String::from_utf8_lossy(&out).into_owned(), error))
    }

    /// Statistics about the session.
    pub fn stats(&self) -> TrieStats {
        let current = self.interpreter.current_trie();
        TrieStats {
            current: self.interpreter.current().map(str::to_owned),
            trie_count: self.interpreter.registry().len(),
            rule_count: current.map(|trie| trie.len()),
            node_count: current.map(|trie| trie.node_count()),
        }
    }

    /// Configuration to persist: the loaded one, with the current trie
    /// remembered as the default for the next session.
    pub fn to_persistent_config(&self) -> PersistentConfig {
        PersistentConfig {
            default_trie: self
                .interpreter
                .current()
                .map(str::to_owned)
                .or_else(|| self.config.default_trie.clone()),
            ..self.config.clone()
        }
    }

    /// Save current state to the configuration file
    pub fn save_config(&self) -> Result<()> {
        self.to_persistent_config()
            .save_to(self.config_file_path.clone())
    }
}

/// Session statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieStats {
    /// Identifier of the current trie
    pub current: Option<String>,
    /// Number of tries in the session
    pub trie_count: usize,
    /// Rules in the current trie
    pub rule_count: Option<usize>,
    /// Nodes in the current trie, the root included
    pub node_count: Option<usize>,
}

impl fmt::Display for TrieStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tries:      {}", self.trie_count)?;
        match &self.current {
            Some(id) => writeln!(f, "Current:    {}", id)?,
            None => writeln!(f, "Current:    (none)")?,
        }
        if let Some(rules) = self.rule_count {
            writeln!(f, "Rules:      {}", rules)?;
        }
        if let Some(nodes) = self.node_count {
            writeln!(f, "Nodes:      {}", nodes)?;
            if let Some(rules) = self.rule_count.filter(|&rules| rules > 0) {
                let ratio = nodes as f64 / rules as f64;
                writeln!(f, "Density:    {:.2} nodes/rule", ratio)?;
            }
        }
        Ok(())
    }
}

//! Rustyline helper integration
//!
//! Provides completion, hinting, highlighting, and validation for the REPL.

use super::highlighter::CommandHighlighter;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};
use std::borrow::Cow;

/// REPL helper
pub struct PhoneForwardHelper {
    highlighter: CommandHighlighter,
    hinter: HistoryHinter,
    commands: Vec<String>,
    topics: Vec<String>,
}

impl PhoneForwardHelper {
    /// Create a new helper instance
    pub fn new() -> Self {
        Self {
            highlighter: CommandHighlighter::new(),
            hinter: HistoryHinter::new(),
            commands: vec![
                "NEW", "DEL", "use", "tries", "list", "rules", "dump", "stats", "info", "help",
                "exit", "quit",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            topics: vec!["numbers", "errors", "count", "comments"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    fn pairs(words: &[String], prefix: &str, trailing_space: bool) -> Vec<Pair> {
        words
            .iter()
            .filter(|word| word.to_lowercase().starts_with(&prefix.to_lowercase()))
            .map(|word| Pair {
                display: word.clone(),
                replacement: if trailing_space {
                    format!("{} ", word)
                } else {
                    word.clone()
                },
            })
            .collect()
    }
}

impl Default for PhoneForwardHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for PhoneForwardHelper {}

impl Completer for PhoneForwardHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let line = line.get(..pos).unwrap_or(line);
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.is_empty() {
            return Ok((0, Self::pairs(&self.commands, "", true)));
        }

        let start = line.rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);

        // Command completion if still typing first word
        if parts.len() == 1 && !line.ends_with(char::is_whitespace) {
            return Ok((start, Self::pairs(&self.commands, parts[0], true)));
        }

        match parts[0].to_lowercase().as_str() {
            "help" if parts.len() <= 2 => {
                let prefix = if line.ends_with(char::is_whitespace) {
                    ""
                } else {
                    parts[parts.len() - 1]
                };
                Ok((start, Self::pairs(&self.topics, prefix, false)))
            }
            _ => Ok((0, vec![])),
        }
    }
}

impl Hinter for PhoneForwardHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for PhoneForwardHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize, forced: bool) -> bool {
        self.highlighter.highlight_char(line, pos, forced)
    }
}

impl Validator for PhoneForwardHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        // Open comments are collected by the state machine, not the editor
        Ok(ValidationResult::Valid(None))
    }
}

//! Error types for the command language.
//!
//! The `Display` form of each variant is exactly the diagnostic line the
//! batch interpreter prints, so callers can forward errors to stderr as is.

use std::io;
use thiserror::Error;

/// Errors that stop a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The byte at `position` (counted from 1) cannot start or continue a
    /// statement.
    #[error("ERROR {position}")]
    Syntax {
        /// Offending byte
        position: usize,
    },

    /// A well-formed statement could not be carried out: no trie is
    /// selected, a rule was rejected, or a trie to drop does not exist.
    #[error("ERROR {operator} {position}")]
    Execution {
        /// `NEW`, `DEL`, `>`, `?` or `@`
        operator: &'static str,
        /// First byte of the operator
        position: usize,
    },

    /// Input ended inside a statement or an open comment.
    #[error("ERROR EOF")]
    UnexpectedEof,

    /// Writing results failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ScriptError {
    /// Check if the error comes from the input itself rather than from
    /// writing results.
    pub fn is_script_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

/// A specialized `Result` type for the command language.
pub type Result<T> = std::result::Result<T, ScriptError>;

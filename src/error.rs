//! Error types for forwarding rule operations.

use thiserror::Error;

/// Errors that can occur when adding a forwarding rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForwardError {
    /// The string is empty or contains a symbol outside the alphabet.
    ///
    /// Numbers may only use `0`-`9`, `:` and `;`.
    #[error("'{number}' is not a valid number")]
    InvalidNumber {
        /// The rejected string
        number: String,
    },

    /// The rule would forward a prefix to itself.
    ///
    /// Substitution must actually change the number, so a key equal to its
    /// target is rejected.
    #[error("cannot forward '{number}' to itself")]
    IdenticalPrefixes {
        /// The key (and target) of the rejected rule
        number: String,
    },
}

/// A specialized `Result` type for forwarding rule operations.
pub type Result<T> = std::result::Result<T, ForwardError>;

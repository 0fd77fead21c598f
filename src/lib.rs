//! # phone-forward
//!
//! Phone number forwarding rules stored on a prefix trie.
//!
//! A rule `key -> target` forwards every number starting with `key` to the
//! same number with that prefix replaced by `target`. The trie answers:
//!
//! - **get**: where does a number end up (longest matching key wins)
//! - **reverse**: which numbers forward onto a given one
//! - **non-trivial count**: how many numbers of a given length over a digit
//!   set start with some rule's target
//!
//! Numbers are strings over a 12-symbol alphabet: the decimal digits
//! followed by `:` and `;`.
//!
//! ## Example
//!
//! ```rust
//! use phone_forward::prelude::*;
//!
//! let mut trie = ForwardTrie::new();
//! trie.add("123", "9").unwrap();
//!
//! assert_eq!(trie.get("12345").as_slice(), ["945"]);
//! assert_eq!(trie.reverse("945").as_slice(), ["12345", "945"]);
//! ```
//!
//! The [`script`] module implements a small command language over named
//! tries; the `phfwd` binary (feature `cli`) runs it in batch mode or as an
//! interactive REPL.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alphabet;
pub mod error;
pub mod forward;
pub mod numbers;
pub mod registry;
pub mod script;

/// Interactive REPL over the command language
#[cfg(feature = "cli")]
pub mod repl;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

pub use error::ForwardError;
pub use forward::{ForwardTrie, Rule};
pub use numbers::PhoneNumbers;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::alphabet::{is_valid_number, DigitSet};
    pub use crate::error::{ForwardError, Result};
    pub use crate::forward::{ForwardTrie, PrefixSet, Rule, Rules};
    pub use crate::numbers::PhoneNumbers;
    pub use crate::registry::TrieRegistry;
    pub use crate::script::{Interpreter, Operation, ScriptError, Statement};
}

//! Execution of parsed statements against a [`TrieRegistry`].

use super::error::Result;
use super::operation::{Operation, Parser, Statement};
use crate::forward::ForwardTrie;
use crate::numbers::PhoneNumbers;
use crate::registry::TrieRegistry;
use log::{debug, trace};
use std::io::{self, Write};

/// Number of leading symbols of an `@` argument that do not count towards
/// the length.
const COUNT_LENGTH_OFFSET: usize = 12;

/// What a statement produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to print.
    Done,
    /// Numbers to print, one per line.
    Numbers(PhoneNumbers),
    /// A count to print on its own line.
    Count(u64),
}

impl Outcome {
    /// Write the printable form, each line terminated by a newline.
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Done => Ok(()),
            Self::Numbers(numbers) => {
                for number in numbers {
                    writeln!(out, "{}", number)?;
                }
                Ok(())
            }
            Self::Count(count) => writeln!(out, "{}", count),
        }
    }
}

/// Runs command-language scripts.
///
/// Holds the registry of named tries and the identifier of the current
/// one. State persists across [`run`](Self::run) calls, so a session can be
/// fed piece by piece.
///
/// ```
/// use phone_forward::script::Interpreter;
///
/// let mut interpreter = Interpreter::new();
/// let mut out = Vec::new();
/// interpreter.run(b"NEW a 1 > 22 $$ rule $$ 13 ? ? 223 @ 2\n", &mut out).unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "223\n123\n223\n0\n");
/// ```
#[derive(Debug, Default)]
pub struct Interpreter {
    registry: TrieRegistry,
    current: Option<String>,
}

impl Interpreter {
    /// Create an interpreter with no tries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute every statement of `source` in order, writing results to
    /// `out`.
    ///
    /// Stops at the first error of any kind; statements before it keep
    /// their effects. Returns the number of statements executed.
    pub fn run(&mut self, source: &[u8], out: &mut impl Write) -> Result<usize> {
        let result = self.run_statements(&mut Parser::new(source), out);
        out.flush()?;
        result
    }

    fn run_statements(&mut self, parser: &mut Parser<'_>, out: &mut impl Write) -> Result<usize> {
        let mut executed = 0;
        while let Some(statement) = parser.next_statement()? {
            let outcome = self.execute(&statement)?;
            outcome.write_to(out)?;
            executed += 1;
        }
        Ok(executed)
    }

    /// Execute one statement.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Execution`](super::ScriptError::Execution) when:
    ///
    /// - a number operation runs with no current trie
    /// - `DEL id` names a trie that does not exist
    /// - a rule is rejected (key equal to target)
    pub fn execute(&mut self, statement: &Statement) -> Result<Outcome> {
        trace!("{} at {}", statement.operation, statement.position);

        match &statement.operation {
            Operation::Select { id } => {
                self.select(id);
                return Ok(Outcome::Done);
            }
            Operation::DropTrie { id } => {
                if self.current.as_deref() == Some(id.as_str()) {
                    self.current = None;
                }
                return if self.registry.remove(id) {
                    Ok(Outcome::Done)
                } else {
                    Err(statement.execution_error())
                };
            }
            _ => {}
        }

        let trie = self
            .current
            .as_deref()
            .and_then(|id| self.registry.get_mut(id))
            .ok_or_else(|| statement.execution_error())?;

        let outcome = match &statement.operation {
            Operation::Remove { prefix } => {
                trie.remove(prefix);
                Outcome::Done
            }
            Operation::Add { key, target } => {
                trie.add(key, target).map_err(|error| {
                    debug!("rejected rule at {}: {}", statement.position, error);
                    statement.execution_error()
                })?;
                Outcome::Done
            }
            Operation::Get { number } => {
                let forwarded = trie.get(number);
                if forwarded.is_empty() {
                    return Err(statement.execution_error());
                }
                Outcome::Numbers(forwarded)
            }
            Operation::Reverse { number } => Outcome::Numbers(trie.reverse(number)),
            Operation::NonTrivialCount { digits } => {
                let len = digits.len().saturating_sub(COUNT_LENGTH_OFFSET);
                Outcome::Count(trie.non_trivial_count(digits, len))
            }
            Operation::Select { .. } | Operation::DropTrie { .. } => Outcome::Done,
        };
        Ok(outcome)
    }

    /// Make trie `id` current, creating it if needed.
    pub fn select(&mut self, id: &str) {
        self.registry.select_or_create(id);
        if self.current.as_deref() != Some(id) {
            debug!("current trie is now {}", id);
            self.current = Some(id.to_owned());
        }
    }

    /// Identifier of the current trie.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The current trie itself.
    pub fn current_trie(&self) -> Option<&ForwardTrie> {
        self.registry.get(self.current.as_deref()?)
    }

    /// All tries known to the interpreter.
    pub fn registry(&self) -> &TrieRegistry {
        &self.registry
    }
}

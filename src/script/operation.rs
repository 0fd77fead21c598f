//! Statements of the command language and their parser.

use super::error::{Result, ScriptError};
use super::lexer::Cursor;
use crate::alphabet::is_symbol;
use std::fmt;

const NEW: &[u8] = b"NEW";
const DEL: &[u8] = b"DEL";
const KEYWORDS: &[&[u8]] = &[NEW, DEL];

/// Check if `word` can name a trie: a letter followed by letters and
/// digits, and not a keyword.
///
/// ```
/// use phone_forward::script::is_identifier;
///
/// assert!(is_identifier("home2"));
/// assert!(!is_identifier("2home"));
/// assert!(!is_identifier("DEL"));
/// ```
pub fn is_identifier(word: &str) -> bool {
    let bytes = word.as_bytes();
    bytes.first().is_some_and(u8::is_ascii_alphabetic)
        && bytes.iter().all(u8::is_ascii_alphanumeric)
        && !KEYWORDS.contains(&bytes)
}

/// One operation of the command language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `NEW id`: make trie `id` current, creating it if needed.
    Select {
        /// Trie identifier
        id: String,
    },
    /// `DEL id`: drop trie `id`.
    DropTrie {
        /// Trie identifier
        id: String,
    },
    /// `DEL num`: remove rules under a prefix of the current trie.
    Remove {
        /// Prefix to cut
        prefix: String,
    },
    /// `num > num`: add a rule to the current trie.
    Add {
        /// Forwarded prefix
        key: String,
        /// Replacement prefix
        target: String,
    },
    /// `num ?`: forward a number through the current trie.
    Get {
        /// Number to resolve
        number: String,
    },
    /// `? num`: list the numbers forwarding onto `number`.
    Reverse {
        /// Number to look up
        number: String,
    },
    /// `@ num`: count non-trivial numbers over the symbols of `digits`.
    ///
    /// The length counted is `digits.len() - 12`, or 0 for shorter input.
    NonTrivialCount {
        /// Symbol set, also determining the length
        digits: String,
    },
}

impl Operation {
    /// The operator named in execution errors.
    pub fn operator(&self) -> &'static str {
        match self {
            Self::Select { .. } => "NEW",
            Self::DropTrie { .. } | Self::Remove { .. } => "DEL",
            Self::Add { .. } => ">",
            Self::Get { .. } | Self::Reverse { .. } => "?",
            Self::NonTrivialCount { .. } => "@",
        }
    }

    /// Check if the operation reads or changes the current trie.
    pub fn needs_current_trie(&self) -> bool {
        !matches!(self, Self::Select { .. } | Self::DropTrie { .. })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select { id } => write!(f, "NEW {}", id),
            Self::DropTrie { id } => write!(f, "DEL {}", id),
            Self::Remove { prefix } => write!(f, "DEL {}", prefix),
            Self::Add { key, target } => write!(f, "{} > {}", key, target),
            Self::Get { number } => write!(f, "{} ?", number),
            Self::Reverse { number } => write!(f, "? {}", number),
            Self::NonTrivialCount { digits } => write!(f, "@ {}", digits),
        }
    }
}

/// A parsed operation with the position of its operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// What to do
    pub operation: Operation,
    /// First byte of the operator (`NEW`, `DEL`, `>`, `?` or `@`),
    /// reported by execution errors
    pub position: usize,
}

impl Statement {
    /// The error reported when this statement cannot be carried out.
    pub fn execution_error(&self) -> ScriptError {
        ScriptError::Execution {
            operator: self.operation.operator(),
            position: self.position,
        }
    }
}

/// Parses statements one at a time.
///
/// Syntax is checked lazily: statements before the first malformed one are
/// returned normally, so a caller can execute each as it comes and stop at
/// the first error of either kind. As an iterator the parser yields the
/// first error and then ends.
///
/// ```
/// use phone_forward::script::{Operation, Parser};
///
/// let mut parser = Parser::new(b"NEW a 12 > 34 $$ note $$ 12?\n");
/// let ops: Vec<_> = parser.by_ref().map(|s| s.unwrap().operation).collect();
///
/// assert_eq!(ops.len(), 3);
/// assert_eq!(ops[2], Operation::Get { number: "12".into() });
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    failed: bool,
}

impl<'a> Parser<'a> {
    /// Start parsing `source` from its first byte.
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(source),
            failed: false,
        }
    }

    /// Parse the next statement, or `None` once only separators remain.
    pub fn next_statement(&mut self) -> Result<Option<Statement>> {
        self.cursor.skip_separators()?;
        let position = self.cursor.position();
        let Some(byte) = self.cursor.peek() else {
            return Ok(None);
        };

        let statement = match byte {
            b'?' => {
                self.cursor.bump();
                self.cursor.skip_separators()?;
                let number = self.cursor.number()?;
                Statement {
                    operation: Operation::Reverse { number },
                    position,
                }
            }
            b'@' => {
                self.cursor.bump();
                self.cursor.skip_separators()?;
                let digits = self.cursor.number()?;
                Statement {
                    operation: Operation::NonTrivialCount { digits },
                    position,
                }
            }
            byte if is_symbol(byte) => self.number_first()?,
            byte if byte.is_ascii_alphabetic() => self.keyword_first(position)?,
            _ => return Err(ScriptError::Syntax { position }),
        };
        Ok(Some(statement))
    }

    /// `num > num` or `num ?`
    fn number_first(&mut self) -> Result<Statement> {
        let key = self.cursor.number()?;
        self.cursor.skip_separators()?;

        let position = self.cursor.position();
        match self.cursor.bump() {
            None => Err(ScriptError::UnexpectedEof),
            Some(b'>') => {
                self.cursor.skip_separators()?;
                let target = self.cursor.number()?;
                Ok(Statement {
                    operation: Operation::Add { key, target },
                    position,
                })
            }
            Some(b'?') => Ok(Statement {
                operation: Operation::Get { number: key },
                position,
            }),
            Some(_) => Err(ScriptError::Syntax { position }),
        }
    }

    /// `NEW id`, `DEL id` or `DEL num`
    fn keyword_first(&mut self, start: usize) -> Result<Statement> {
        let is_new = if self.cursor.eat(NEW) {
            true
        } else if self.cursor.eat(DEL) {
            false
        } else {
            return Err(ScriptError::Syntax { position: start });
        };

        let separated = self.cursor.skip_separators()?;
        let position = self.cursor.position();
        let next = match self.cursor.peek() {
            None => return Err(ScriptError::UnexpectedEof),
            Some(b'?' | b'>') => return Err(ScriptError::Syntax { position }),
            Some(_) if !separated => return Err(ScriptError::Syntax { position: start }),
            Some(byte) => byte,
        };

        let operation = if is_new {
            Operation::Select {
                id: self.cursor.identifier(KEYWORDS)?,
            }
        } else if is_symbol(next) {
            Operation::Remove {
                prefix: self.cursor.number()?,
            }
        } else if next.is_ascii_alphabetic() {
            Operation::DropTrie {
                id: self.cursor.identifier(KEYWORDS)?,
            }
        } else {
            return Err(ScriptError::Syntax { position });
        };

        Ok(Statement {
            operation,
            position: start,
        })
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<Statement>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_statement() {
            Ok(statement) => statement.map(Ok),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

//! The command language for driving named forwarding tries.
//!
//! A script is a byte stream of statements:
//!
//! | Statement | Effect |
//! |---|---|
//! | `NEW id` | make trie `id` current, creating it if needed |
//! | `DEL id` | drop trie `id` |
//! | `DEL num` | remove every rule whose key starts with `num` |
//! | `num > num` | add a forwarding rule |
//! | `num ?` | print where `num` is forwarded |
//! | `? num` | print every number forwarding onto `num` |
//! | `@ num` | print the non-trivial count over the symbols of `num` |
//!
//! Identifiers are a letter followed by letters and digits; `NEW` and `DEL`
//! are reserved. Numbers use the symbols `0`-`9`, `:` and `;`. Whitespace
//! and `$$ ... $$` comments separate tokens, and a keyword must be
//! separated from its argument.
//!
//! Processing stops at the first error, reported as one of:
//!
//! - `ERROR n`: syntax error at byte `n` (counted from 1)
//! - `ERROR op n`: operator `op` at byte `n` could not be executed
//! - `ERROR EOF`: input ended inside a statement or comment
//!
//! # Example
//!
//! ```
//! use phone_forward::script::{Interpreter, ScriptError};
//!
//! let mut interpreter = Interpreter::new();
//! let mut out = Vec::new();
//! let result = interpreter.run(b"NEW home 0 > 48 $$ dial out $$ 0123 ?\n 1 > 1\n", &mut out);
//!
//! assert_eq!(out, b"48123\n");
//! assert!(matches!(result, Err(ScriptError::Execution { operator: ">", position: 42 })));
//! ```

mod error;
mod interpreter;
mod lexer;
mod operation;

pub use error::{Result, ScriptError};
pub use interpreter::{Interpreter, Outcome};
pub use lexer::{ends_in_open_comment, is_space};
pub use operation::{is_identifier, Operation, Parser, Statement};

/// Parse `source` without executing it.
///
/// Reports the first syntax or EOF error; execution errors cannot be
/// detected without running. Returns the number of statements.
///
/// ```
/// use phone_forward::script::check;
///
/// assert_eq!(check(b"NEW a 1 > 2 DEL a\n").unwrap(), 3);
/// assert_eq!(check(b"NEW a 1 > 2").unwrap_err().to_string(), "ERROR EOF");
/// ```
pub fn check(source: &[u8]) -> Result<usize> {
    let mut parser = Parser::new(source);
    let mut statements = 0;
    while parser.next_statement()?.is_some() {
        statements += 1;
    }
    Ok(statements)
}

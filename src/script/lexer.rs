//! Byte-level scanning of command-language source.
//!
//! Positions are 1-based byte offsets into the source. Whitespace and
//! `$$ ... $$` comments separate tokens; everything else is read by the
//! parser through a [`Cursor`].

use super::error::{Result, ScriptError};
use crate::alphabet::is_symbol;

/// Comment delimiter; the same marker opens and closes a comment.
const COMMENT: &[u8] = b"$$";

/// Check for a byte the command language treats as whitespace.
///
/// This is ASCII whitespace plus vertical tab.
pub fn is_space(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0b
}

/// Check if `source` ends inside a comment that was opened but never
/// closed.
///
/// Used by interactive front ends to keep reading lines before running
/// anything. A lone `$` outside a comment does not count as an opening.
///
/// ```
/// use phone_forward::script::ends_in_open_comment;
///
/// assert!(ends_in_open_comment(b"NEW a $$ spans"));
/// assert!(!ends_in_open_comment(b"NEW a $$ closed $$ 1?"));
/// ```
pub fn ends_in_open_comment(source: &[u8]) -> bool {
    let mut rest = source;
    loop {
        let Some(marker) = rest.iter().position(|&b| b == COMMENT[0]) else {
            return false;
        };
        rest = &rest[marker..];
        if !rest.starts_with(COMMENT) {
            // Syntax error before any comment could open
            return false;
        }
        rest = &rest[COMMENT.len()..];
        match find(rest, COMMENT) {
            Some(close) => rest = &rest[close + COMMENT.len()..],
            None => return true,
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Copy an ASCII token out of the source.
fn ascii_string(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Read position over a script.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    source: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a [u8]) -> Self {
        Self { source, offset: 0 }
    }

    /// Position of the next unread byte.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.offset + 1
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.source.get(self.offset).copied()
    }

    pub(crate) fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.offset += 1;
        Some(byte)
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Consume `word` if the unread input starts with it.
    pub(crate) fn eat(&mut self, word: &[u8]) -> bool {
        if self.rest().starts_with(word) {
            self.offset += word.len();
            true
        } else {
            false
        }
    }

    fn rest(&self) -> &'a [u8] {
        &self.source[self.offset..]
    }

    fn take_while(&mut self, predicate: impl Fn(u8) -> bool) -> &'a [u8] {
        let rest = self.rest();
        let len = rest.iter().take_while(|&&byte| predicate(byte)).count();
        self.offset += len;
        &rest[..len]
    }

    /// Skip whitespace and comments.
    ///
    /// Returns whether anything was skipped.
    ///
    /// # Errors
    ///
    /// - [`ScriptError::Syntax`] at a `$` that does not open a comment.
    /// - [`ScriptError::UnexpectedEof`] if a comment is never closed.
    pub(crate) fn skip_separators(&mut self) -> Result<bool> {
        let start = self.offset;
        loop {
            self.take_while(is_space);
            if self.peek() != Some(b'$') {
                break;
            }
            if !self.eat(COMMENT) {
                return Err(ScriptError::Syntax {
                    position: self.position(),
                });
            }
            match find(self.rest(), COMMENT) {
                Some(close) => self.offset += close + COMMENT.len(),
                None => {
                    self.offset = self.source.len();
                    return Err(ScriptError::UnexpectedEof);
                }
            }
        }
        Ok(self.offset != start)
    }

    /// Read a non-empty run of alphabet symbols.
    ///
    /// Running out of input right after the digits is an EOF error: every
    /// number must be followed by at least one more byte.
    pub(crate) fn number(&mut self) -> Result<String> {
        let position = self.position();
        let digits = self.take_while(is_symbol);
        if self.is_at_end() {
            return Err(ScriptError::UnexpectedEof);
        }
        if digits.is_empty() {
            return Err(ScriptError::Syntax { position });
        }
        Ok(ascii_string(digits))
    }

    /// Read a trie identifier: a letter followed by letters and digits,
    /// other than a keyword.
    pub(crate) fn identifier(&mut self, keywords: &[&[u8]]) -> Result<String> {
        let position = self.position();
        let word = self.take_while(|byte| byte.is_ascii_alphanumeric());
        match word.first() {
            Some(first) if first.is_ascii_alphabetic() && !keywords.contains(&word) => {
                Ok(ascii_string(word))
            }
            _ => Err(ScriptError::Syntax { position }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_whitespace_and_comments() {
        let mut cursor = Cursor::new(b" \t\x0b\x0c\r\n$$ note $$  $$$$x");
        assert!(cursor.skip_separators().unwrap());
        assert_eq!(cursor.peek(), Some(b'x'));
        assert!(!cursor.skip_separators().unwrap());
    }

    #[test]
    fn test_lone_dollar_is_syntax_error() {
        let mut cursor = Cursor::new(b"  $x");
        assert!(matches!(
            cursor.skip_separators(),
            Err(ScriptError::Syntax { position: 3 })
        ));

        let mut cursor = Cursor::new(b"$");
        assert!(matches!(
            cursor.skip_separators(),
            Err(ScriptError::Syntax { position: 1 })
        ));
    }

    #[test]
    fn test_single_dollar_inside_comment() {
        let mut cursor = Cursor::new(b"$$ costs $5 $$1");
        cursor.skip_separators().unwrap();
        assert_eq!(cursor.position(), 15);
    }

    #[test]
    fn test_unclosed_comment_is_eof() {
        let mut cursor = Cursor::new(b"$$ never closed $");
        assert!(matches!(
            cursor.skip_separators(),
            Err(ScriptError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_number() {
        let mut cursor = Cursor::new(b"12:;9>");
        assert_eq!(cursor.number().unwrap(), "12:;9");
        assert_eq!(cursor.peek(), Some(b'>'));
    }

    #[test]
    fn test_number_at_end_of_input() {
        assert!(matches!(
            Cursor::new(b"123").number(),
            Err(ScriptError::UnexpectedEof)
        ));
        assert!(matches!(
            Cursor::new(b"").number(),
            Err(ScriptError::UnexpectedEof)
        ));
        assert!(matches!(
            Cursor::new(b"x").number(),
            Err(ScriptError::Syntax { position: 1 })
        ));
    }

    #[test]
    fn test_identifier() {
        let keywords: &[&[u8]] = &[b"NEW", b"DEL"];
        let mut cursor = Cursor::new(b"abc12 ");
        assert_eq!(cursor.identifier(keywords).unwrap(), "abc12");

        // At end of input is fine
        assert_eq!(Cursor::new(b"z").identifier(keywords).unwrap(), "z");

        for bad in [&b"1abc"[..], b"NEW", b"DEL", b"?"] {
            assert!(matches!(
                Cursor::new(bad).identifier(keywords),
                Err(ScriptError::Syntax { position: 1 })
            ));
        }
        assert_eq!(Cursor::new(b"NEWS").identifier(keywords).unwrap(), "NEWS");
    }

    #[test]
    fn test_ends_in_open_comment() {
        assert!(!ends_in_open_comment(b""));
        assert!(!ends_in_open_comment(b"1 > 2"));
        assert!(ends_in_open_comment(b"$$"));
        assert!(ends_in_open_comment(b"$$ a $$ b $$"));
        assert!(!ends_in_open_comment(b"$$$$"));
        assert!(!ends_in_open_comment(b"$ 1"));
        assert!(!ends_in_open_comment(b"1 $ x $$ y"));
        assert!(!ends_in_open_comment(b"$$ a $$ $ $$ b"));
        assert!(ends_in_open_comment(b"$$ a $ b"));
    }
}

//! Syntax highlighting for REPL input

use crate::alphabet::is_symbol;
use colored::Colorize;
use rustyline::highlight::Highlighter;

/// Command highlighter
///
/// Meta commands get their first word highlighted; anything else is
/// highlighted token by token as command-language source.
pub struct CommandHighlighter {
    commands: Vec<String>,
}

impl CommandHighlighter {
    /// Create a highlighter for the meta command words
    pub fn new() -> Self {
        Self {
            commands: vec![
                "use", "tries", "list", "rules", "dump", "stats", "info", "help", "exit", "quit",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }

    fn highlight_command(&self, line: &str) -> String {
        let trimmed = line.trim_start();
        let Some(first) = trimmed.split_whitespace().next() else {
            return line.to_string();
        };

        if self.commands.iter().any(|c| *c == first.to_lowercase()) {
            let indent = &line[..line.len() - trimmed.len()];
            let rest = &trimmed[first.len()..];
            format!("{}{}{}", indent, first.blue().bold(), rest)
        } else {
            Self::highlight_script(line)
        }
    }

    fn highlight_script(line: &str) -> String {
        let mut result = String::with_capacity(line.len());
        let mut rest = line;

        while let Some(ch) = rest.chars().next() {
            let len = if rest.starts_with("$$") {
                // Comment, up to and including its closing marker
                let len = rest[2..].find("$$").map_or(rest.len(), |end| end + 4);
                result.push_str(&rest[..len].dimmed().to_string());
                len
            } else if ch.is_ascii_alphabetic() {
                let len = run_length(rest, |b| b.is_ascii_alphanumeric());
                let word = &rest[..len];
                if word == "NEW" || word == "DEL" {
                    result.push_str(&word.blue().bold().to_string());
                } else {
                    result.push_str(&word.cyan().to_string());
                }
                len
            } else if ch.is_ascii() && is_symbol(ch as u8) {
                let len = run_length(rest, is_symbol);
                result.push_str(&rest[..len].magenta().to_string());
                len
            } else if matches!(ch, '>' | '?' | '@') {
                result.push_str(&ch.to_string().yellow().bold().to_string());
                1
            } else {
                result.push(ch);
                ch.len_utf8()
            };
            rest = &rest[len..];
        }

        result
    }
}

/// Length of the leading run of ASCII bytes satisfying `pred`.
fn run_length(s: &str, pred: impl Fn(u8) -> bool) -> usize {
    s.bytes().take_while(|&b| pred(b)).count()
}

impl Default for CommandHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for CommandHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> std::borrow::Cow<'l, str> {
        std::borrow::Cow::Owned(self.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

//! Command parsing and execution
//!
//! Lines starting with a meta command word are REPL commands; everything
//! else is command-language source.

use super::state::ReplState;
use crate::script::is_identifier;
use anyhow::{Context, Result};
use colored::Colorize;

/// REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run command-language source
    Script {
        /// Source text; error positions count from its first byte
        source: String,
    },
    /// Select a trie: use <id>
    Use {
        /// Trie identifier
        id: String,
    },
    /// List tries: tries | list
    Tries,
    /// List rules of the current trie: rules | dump [limit]
    Rules {
        /// Limit number of rules shown
        limit: Option<usize>,
    },
    /// Show statistics: stats | info
    Stats,
    /// Show help: help [topic]
    Help {
        /// Help topic
        topic: Option<String>,
    },
    /// Exit REPL: exit | quit
    Exit,
}

/// Command result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Continue REPL
    Continue(String),
    /// Exit REPL
    Exit,
    /// No output
    Silent,
}

impl Command {
    /// Parse command from input string
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(anyhow::anyhow!("Empty command"));
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "use" => Self::parse_use(&parts[1..]),
            "tries" | "list" => Ok(Self::Tries),
            "rules" | "dump" => Self::parse_rules(&parts[1..]),
            "stats" | "info" => Ok(Self::Stats),
            "help" => Ok(Self::Help {
                topic: parts.get(1).map(|s| s.to_string()),
            }),
            "exit" | "quit" => Ok(Self::Exit),
            _ => Ok(Self::Script {
                source: input.to_string(),
            }),
        }
    }

    fn parse_use(args: &[&str]) -> Result<Self> {
        match args {
            [id] if is_identifier(id) => Ok(Self::Use { id: id.to_string() }),
            [id] => Err(anyhow::anyhow!(
                "'{}' is not a trie identifier: use a letter followed by letters or digits, other than NEW and DEL",
                id
            )),
            _ => Err(anyhow::anyhow!("Usage: use <id>")),
        }
    }

    fn parse_rules(args: &[&str]) -> Result<Self> {
        let limit = match args.first() {
            Some(arg) => Some(arg.parse().context("Invalid limit value")?),
            None => None,
        };
        Ok(Self::Rules { limit })
    }

    /// Execute command
    pub fn execute(&self, state: &mut ReplState) -> Result<CommandResult> {
        match self {
            Self::Script { source } => {
                let (output, error) = state.run_script(source)?;
                let mut output = output.trim_end().to_string();
                if let Some(error) = error {
                    if !output.is_empty() {
                        output.push('\n');
                    }
                    output.push_str(&error.to_string().red().bold().to_string());
                }
                if output.is_empty() {
                    Ok(CommandResult::Silent)
                } else {
                    Ok(CommandResult::Continue(output))
                }
            }

            Self::Use { id } => {
                let existed = state.interpreter.registry().contains(id);
                state.interpreter.select(id);
                let msg = if existed {
                    format!("Using trie {}", id.cyan().bold())
                } else {
                    format!("Created trie {}", id.green().bold())
                };
                Ok(CommandResult::Continue(msg))
            }

            Self::Tries => {
                let registry = state.interpreter.registry();
                if registry.is_empty() {
                    return Ok(CommandResult::Continue(format!(
                        "No tries yet. Create one with {}",
                        "NEW <id>".yellow()
                    )));
                }

                let current = state.interpreter.current();
                let mut output = String::new();
                for id in registry.ids() {
                    let rules = registry.get(id).map_or(0, |trie| trie.len());
                    let marker = if current == Some(id) { "*" } else { " " };
                    output.push_str(&format!(
                        "{} {} ({} rule(s))\n",
                        marker.green().bold(),
                        id.cyan(),
                        rules
                    ));
                }
                Ok(CommandResult::Continue(output.trim_end().to_string()))
            }

            Self::Rules { limit } => {
                let trie = state
                    .interpreter
                    .current_trie()
                    .context("No trie selected. Use 'NEW <id>' or 'use <id>' first")?;
                let total = trie.len();
                let shown = limit.unwrap_or(total);

                let mut output = String::new();
                for (i, rule) in trie.rules().take(shown).enumerate() {
                    output.push_str(&format!(
                        "{:4}. {} > {}\n",
                        i + 1,
                        rule.key().magenta(),
                        rule.target().magenta()
                    ));
                }

                if total > shown {
                    output.push_str(&format!(
                        "\n... {} more rules (showing {}/{})",
                        (total - shown).to_string().yellow(),
                        shown,
                        total
                    ));
                } else {
                    output.push_str(&format!("\nTotal: {} rules", total.to_string().green()));
                }

                Ok(CommandResult::Continue(output))
            }

            Self::Stats => {
                let stats = state.stats();
                Ok(CommandResult::Continue(stats.to_string().trim_end().to_string()))
            }

            Self::Help { topic } => {
                let help_text = match topic {
                    Some(topic) => Self::topic_help(topic),
                    None => Self::general_help(),
                };
                Ok(CommandResult::Continue(help_text))
            }

            Self::Exit => Ok(CommandResult::Exit),
        }
    }

    fn general_help() -> String {
        format!(
            r#"{}

{}
  NEW <id>                  Select trie <id>, creating it if needed
  DEL <id>                  Drop trie <id>
  DEL <num>                 Remove rules whose key starts with <num>
  <num> > <num>             Forward the first prefix to the second
  <num> ?                   Show where <num> is forwarded
  ? <num>                   Show every number forwarding onto <num>
  @ <num>                   Count non-trivial numbers over the symbols of <num>
  $$ ... $$                 Comment (may span lines)

{}
  use <id>                  Select trie <id> (same as NEW <id>)
  tries, list               List tries, current one marked with *
  rules, dump [limit]       Show rules of the current trie
  stats, info               Show statistics

{}
  help [topic]              Show this help or help for a topic
                            Topics: numbers, errors, count, comments
  exit, quit                Exit REPL

{}
  phfwd> NEW home
  phfwd> 0 > 4822 $$ national prefix $$
  phfwd> 0612 ?
  phfwd> ? 4822612
"#,
            "phone-forward REPL - Interactive Forwarding Rules"
                .bold()
                .underline(),
            "Statements:".bold(),
            "Session:".bold(),
            "Utility:".bold(),
            "Examples:".bold(),
        )
    }

    fn topic_help(topic: &str) -> String {
        match topic.to_lowercase().as_str() {
            "numbers" | "number" | "num" => format!(
                r#"{}

  Numbers are non-empty runs of the symbols 0-9, ':' and ';'.
  A rule '<key> > <target>' rewrites every number starting with <key>:
  the longest matching key wins, and the rest of the number is kept.

  phfwd> 12 > 9
  phfwd> 1234 ?
  934
"#,
                "numbers - Forwarding Rules".bold().underline()
            ),
            "errors" | "error" => format!(
                r#"{}

  ERROR n       Syntax error at byte n of the line
  ERROR op n    Operator op at byte n could not be executed:
                no trie selected, DEL of an unknown trie,
                or a rule forwarding a number to itself
  ERROR EOF     The line ended inside a statement or comment

  A line stops at its first error; earlier statements keep their effect.
"#,
                "errors - Error Reports".bold().underline()
            ),
            "count" | "@" => format!(
                r#"{}

  @ <num> counts numbers of length len(<num>) - 12 (0 if shorter),
  built only from the symbols occurring in <num>, that start with the
  target of some rule. Counts wrap around at 2^64.

  phfwd> 9 > 1
  phfwd> @ 0123456789:;12
  12
"#,
                "count - Non-Trivial Numbers".bold().underline()
            ),
            "comments" | "comment" | "$$" => format!(
                r#"{}

  Comments start and end with '$$' and count as whitespace.
  A comment left open at the end of a line continues on the next one.
  A single '$' outside a comment is a syntax error.
"#,
                "comments".bold().underline()
            ),
            _ => format!(
                "{}: No help available for '{}'. Type 'help' for the command list.",
                "Unknown topic".yellow(),
                topic
            ),
        }
    }
}

//! REPL state machine
//!
//! Provides a structured state machine for managing REPL execution flow,
//! inspired by The Elm Architecture (TEA) and functional state management patterns.

use super::command::{Command, CommandResult};
use crate::script::ends_in_open_comment;
use anyhow::Result;
use colored::Colorize;

/// REPL execution phase
///
/// Represents the current state of the REPL's execution cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplPhase {
    /// Ready to accept new input
    Ready,

    /// Input so far ends inside an open `$$` comment
    Continuation {
        /// Buffer containing accumulated input
        buffer: String,
    },

    /// Executing a command
    Executing {
        /// The command being executed
        command: Command,
    },

    /// Exiting the REPL
    Exiting,
}

impl ReplPhase {
    /// Check if the phase is terminal (requires exit)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exiting)
    }

    /// Get a status indicator string for display
    pub fn status_indicator(&self) -> String {
        match self {
            Self::Ready => "🔵".to_string(),
            Self::Continuation { .. } => "🟡".to_string(),
            Self::Executing { .. } => "🟢".to_string(),
            Self::Exiting => "👋".to_string(),
        }
    }
}

impl Default for ReplPhase {
    fn default() -> Self {
        Self::Ready
    }
}

/// REPL event
///
/// Represents events that trigger state transitions in the REPL.
#[derive(Debug, Clone)]
pub enum ReplEvent {
    /// User submitted a line of input
    LineSubmitted {
        /// The input line
        line: String,
    },

    /// Command execution completed
    CommandExecuted {
        /// The execution result
        result: CommandResult,
    },

    /// User interrupted (Ctrl+C)
    Interrupted,

    /// End of file (Ctrl+D)
    Eof,

    /// Execution failed; the REPL reports it and stays ready
    ExecutionError {
        /// Error message
        message: String,
    },
}

/// State transition result
#[derive(Debug)]
pub struct Transition {
    /// New phase after transition
    pub new_phase: ReplPhase,
    /// Optional output message
    pub output: Option<String>,
}

impl Transition {
    /// Create a simple transition with no output
    pub fn to(phase: ReplPhase) -> Self {
        Self {
            new_phase: phase,
            output: None,
        }
    }

    /// Create a transition with output
    pub fn to_with_output(phase: ReplPhase, output: String) -> Self {
        Self {
            new_phase: phase,
            output: Some(output),
        }
    }
}

/// State machine for REPL execution
#[derive(Debug, Default)]
pub struct ReplStateMachine {
    /// Current phase
    phase: ReplPhase,
}

impl ReplStateMachine {
    /// Create a new state machine in Ready phase
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current phase
    pub fn phase(&self) -> &ReplPhase {
        &self.phase
    }

    /// Check if the state machine is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Parse complete input, or keep collecting it while a comment is open.
    fn submit(input: String) -> Transition {
        if ends_in_open_comment(input.as_bytes()) {
            return Transition::to(ReplPhase::Continuation { buffer: input });
        }
        match Command::parse(&input) {
            Ok(command) => Transition::to(ReplPhase::Executing { command }),
            Err(e) => Transition::to_with_output(
                ReplPhase::Ready,
                format!("{}: {}", "Parse error".red().bold(), e),
            ),
        }
    }

    /// Process an event and transition to a new state
    pub fn process_event(&mut self, event: ReplEvent) -> Result<Transition> {
        let transition = match (&self.phase, event) {
            // Ready state transitions
            (ReplPhase::Ready, ReplEvent::LineSubmitted { line }) => {
                if line.trim().is_empty() {
                    Transition::to(ReplPhase::Ready)
                } else {
                    Self::submit(line)
                }
            }

            (ReplPhase::Ready, ReplEvent::Interrupted) => Transition::to_with_output(
                ReplPhase::Ready,
                "^C (Use 'exit' or Ctrl+D to quit)".yellow().to_string(),
            ),

            (ReplPhase::Ready, ReplEvent::Eof) => {
                Transition::to_with_output(ReplPhase::Exiting, "Goodbye!".green().to_string())
            }

            // Continuation state transitions; lines are joined so the
            // comment keeps its line breaks
            (ReplPhase::Continuation { buffer }, ReplEvent::LineSubmitted { line }) => {
                let mut input = buffer.clone();
                input.push('\n');
                input.push_str(&line);
                Self::submit(input)
            }

            (ReplPhase::Continuation { .. }, ReplEvent::Interrupted) => Transition::to_with_output(
                ReplPhase::Ready,
                "Continuation cancelled".yellow().to_string(),
            ),

            (ReplPhase::Continuation { .. }, ReplEvent::Eof) => Transition::to_with_output(
                ReplPhase::Exiting,
                format!("{} (unclosed comment discarded)", "Goodbye!".green()),
            ),

            // Executing state transitions
            (ReplPhase::Executing { .. }, ReplEvent::CommandExecuted { result }) => match result {
                CommandResult::Continue(output) => {
                    if output.is_empty() {
                        Transition::to(ReplPhase::Ready)
                    } else {
                        Transition::to_with_output(ReplPhase::Ready, output)
                    }
                }
                CommandResult::Exit => {
                    Transition::to_with_output(ReplPhase::Exiting, "Goodbye!".green().to_string())
                }
                CommandResult::Silent => Transition::to(ReplPhase::Ready),
            },

            (ReplPhase::Executing { .. }, ReplEvent::ExecutionError { message }) => {
                Transition::to_with_output(
                    ReplPhase::Ready,
                    format!("{}: {}", "Error".red().bold(), message),
                )
            }

            // Exiting state (terminal)
            (ReplPhase::Exiting, _) => Transition::to(ReplPhase::Exiting),

            // Catch-all for unexpected transitions
            (current, event) => {
                log::warn!("unexpected event {:?} in phase {:?}", event, current);
                Transition::to(ReplPhase::Ready)
            }
        };

        self.phase = transition.new_phase.clone();

        Ok(transition)
    }

    /// Reset to Ready phase
    pub fn reset(&mut self) {
        self.phase = ReplPhase::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(sm: &mut ReplStateMachine, line: &str) -> Transition {
        sm.process_event(ReplEvent::LineSubmitted {
            line: line.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_ready_to_executing() {
        let mut sm = ReplStateMachine::new();
        assert!(matches!(sm.phase(), ReplPhase::Ready));

        let transition = submit(&mut sm, "help");
        assert!(transition.output.is_none());
        assert!(matches!(
            sm.phase(),
            ReplPhase::Executing {
                command: Command::Help { topic: None }
            }
        ));
    }

    #[test]
    fn test_blank_line_stays_ready() {
        let mut sm = ReplStateMachine::new();
        submit(&mut sm, "   ");
        assert_eq!(sm.phase(), &ReplPhase::Ready);
    }

    #[test]
    fn test_open_comment_continues() {
        let mut sm = ReplStateMachine::new();

        submit(&mut sm, "NEW a $$ this comment");
        assert!(matches!(sm.phase(), ReplPhase::Continuation { .. }));

        submit(&mut sm, "still going");
        assert!(matches!(sm.phase(), ReplPhase::Continuation { .. }));

        submit(&mut sm, "ends here $$ 1 ?");
        match sm.phase() {
            ReplPhase::Executing {
                command: Command::Script { source },
            } => {
                assert_eq!(source, "NEW a $$ this comment\nstill going\nends here $$ 1 ?");
            }
            other => panic!("unexpected phase {:?}", other),
        }
    }

    #[test]
    fn test_lone_dollar_does_not_continue() {
        let mut sm = ReplStateMachine::new();
        submit(&mut sm, "1 $ x $$ y");
        assert!(matches!(
            sm.phase(),
            ReplPhase::Executing {
                command: Command::Script { .. }
            }
        ));
    }

    #[test]
    fn test_interrupt_cancels_continuation() {
        let mut sm = ReplStateMachine::new();
        submit(&mut sm, "$$ open");
        sm.process_event(ReplEvent::Interrupted).unwrap();
        assert_eq!(sm.phase(), &ReplPhase::Ready);
    }

    #[test]
    fn test_execution_result_returns_to_ready() {
        let mut sm = ReplStateMachine::new();
        submit(&mut sm, "1 ?");
        let transition = sm
            .process_event(ReplEvent::CommandExecuted {
                result: CommandResult::Continue("1".to_string()),
            })
            .unwrap();
        assert_eq!(transition.output.as_deref(), Some("1"));
        assert_eq!(sm.phase(), &ReplPhase::Ready);
    }

    #[test]
    fn test_execution_error_returns_to_ready() {
        let mut sm = ReplStateMachine::new();
        submit(&mut sm, "stats");
        let transition = sm
            .process_event(ReplEvent::ExecutionError {
                message: "broken".to_string(),
            })
            .unwrap();
        assert!(transition.output.is_some_and(|out| out.contains("broken")));
        assert_eq!(sm.phase(), &ReplPhase::Ready);
        assert!(!sm.is_terminal());
    }

    #[test]
    fn test_interrupt_recovery() {
        let mut sm = ReplStateMachine::new();

        // Interrupt in Ready state
        let result = sm.process_event(ReplEvent::Interrupted);
        assert!(result.is_ok());
        assert!(matches!(sm.phase(), ReplPhase::Ready));
    }

    #[test]
    fn test_eof_exits() {
        let mut sm = ReplStateMachine::new();

        let result = sm.process_event(ReplEvent::Eof);
        assert!(result.is_ok());
        assert!(matches!(sm.phase(), ReplPhase::Exiting));
        assert!(sm.is_terminal());
    }
}

//! phfwd - phone number forwarding
//!
//! Runs forwarding scripts in batch mode, or interactively in a REPL.

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process;

use phone_forward::cli::commands;
use phone_forward::cli::paths::PersistentConfig;
use phone_forward::cli::{Cli, Commands};
use phone_forward::repl::{
    PhoneForwardHelper, ReplConfig, ReplEvent, ReplPhase, ReplState, ReplStateMachine,
};
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Repl {
            trie,
            history,
            no_banner,
        }) => run_repl(cli.config, trie, history, no_banner).map(|()| true),
        Some(command) => commands::execute(command, cli.config),
        None => commands::execute(Commands::Run { file: None }, cli.config),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            process::exit(1);
        }
    }
}

fn run_repl(
    config_path: Option<PathBuf>,
    trie: Option<String>,
    history: Option<PathBuf>,
    no_banner: bool,
) -> anyhow::Result<()> {
    if let Some(id) = &trie {
        if !phone_forward::script::is_identifier(id) {
            anyhow::bail!("'{}' is not a valid trie identifier", id);
        }
    }

    // Load persistent config, falling back to defaults when it is unreadable
    let config = match PersistentConfig::load_from(config_path.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {:#}", "Warning".yellow(), e);
            PersistentConfig::default()
        }
    };

    // Merge with CLI options
    let banner = if no_banner { Some(false) } else { None };
    let merged_config = config.merge_with_cli(trie, history, banner);
    let repl_config = ReplConfig::from_persistent(&merged_config);

    if repl_config.banner {
        print_banner();
    }

    let mut state = ReplState::with_config(merged_config, config_path);

    // Initialize Rustyline
    let rustyline_config = Config::builder()
        .auto_add_history(true)
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .max_history_size(repl_config.max_history)?
        .build();

    let mut editor: Editor<PhoneForwardHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(rustyline_config)?;
    editor.set_helper(Some(PhoneForwardHelper::new()));

    // Load history if it exists
    if let Some(history_path) = &repl_config.history_file {
        if history_path.exists() {
            if let Err(e) = editor.load_history(history_path) {
                log::warn!("could not load history {}: {}", history_path.display(), e);
            }
        }
    }

    let mut state_machine = ReplStateMachine::new();

    // Main REPL loop with state machine
    let mut line_num = 0;
    loop {
        if state_machine.is_terminal() {
            break;
        }

        line_num += 1;

        let state_indicator = state_machine.phase().status_indicator();
        let context = match state.interpreter.current() {
            Some(id) => id.bright_yellow().to_string(),
            None => "-".dimmed().to_string(),
        };

        let prompt = match state_machine.phase() {
            ReplPhase::Continuation { .. } => format!(
                "{} {}[{}] {}{}",
                state_indicator,
                repl_config.prompt.bright_cyan().bold(),
                line_num,
                context,
                repl_config.continuation_prompt
            ),
            _ => format!(
                "{} {}[{}] {}> ",
                state_indicator,
                repl_config.prompt.bright_cyan().bold(),
                line_num,
                context
            ),
        };

        // Convert readline result to event
        let event = match editor.readline(&prompt) {
            Ok(line) => ReplEvent::LineSubmitted {
                line: line.trim().to_string(),
            },
            Err(ReadlineError::Interrupted) => ReplEvent::Interrupted,
            Err(ReadlineError::Eof) => ReplEvent::Eof,
            Err(err) => {
                eprintln!("{}: {:?}", "Readline error".red().bold(), err);
                break;
            }
        };

        match state_machine.process_event(event) {
            Ok(transition) => {
                if let Some(output) = transition.output {
                    println!("{}", output);
                }

                if let ReplPhase::Executing { command } = state_machine.phase() {
                    let event = match command.execute(&mut state) {
                        Ok(result) => ReplEvent::CommandExecuted { result },
                        Err(e) => ReplEvent::ExecutionError {
                            message: format!("{:#}", e),
                        },
                    };
                    if let Ok(exec_transition) = state_machine.process_event(event) {
                        if let Some(exec_output) = exec_transition.output {
                            println!("{}", exec_output);
                        }
                    }
                }
            }
            Err(e) => {
                eprintln!("{}: State machine error: {}", "Error".red().bold(), e);
                state_machine.reset();
            }
        }
    }

    // Save history
    if let Some(history_path) = &repl_config.history_file {
        if let Err(e) = editor.save_history(history_path) {
            eprintln!("{}: Failed to save history: {}", "Warning".yellow(), e);
        }
    }

    // Save config on exit
    if let Err(e) = state.save_config() {
        eprintln!("{}: Failed to save config: {}", "Warning".yellow(), e);
    }

    Ok(())
}

fn print_banner() {
    println!();
    println!(
        "{}",
        "═══════════════════════════════════════════════════════".bright_cyan()
    );
    println!(
        "{}",
        "   phfwd - Phone Number Forwarding".bright_cyan().bold()
    );
    println!(
        "{}",
        "═══════════════════════════════════════════════════════".bright_cyan()
    );
    println!();
    println!("  Version: {}", env!("CARGO_PKG_VERSION").green());
    println!("  Type {} for available commands", "'help'".yellow().bold());
    println!(
        "  Type {} or press {} to exit",
        "'exit'".yellow().bold(),
        "Ctrl+D".yellow().bold()
    );
    println!();
    println!("{}", "  Quick Start:".bold());
    println!("    • Create a trie:     {}", "NEW home".cyan());
    println!("    • Add a rule:        {}", "0 > 4822".cyan());
    println!("    • Forward a number:  {}", "0612 ?".cyan());
    println!("    • Find sources:      {}", "? 4822612".cyan());
    println!();
}

//! CLI command implementations

use anyhow::{bail, Context, Result};
use colored::Colorize;
use log::info;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::script::{self, Interpreter, ScriptError};

use super::args::Commands;
use super::paths::{config_file_path_with_override, PersistentConfig};

/// Execute a CLI command
///
/// Returns `Ok(false)` when a script failed; the error has already been
/// reported on stderr.
pub fn execute(command: Commands, config_path: Option<PathBuf>) -> Result<bool> {
    match command {
        Commands::Run { file } => {
            let source = read_source(file.as_deref())?;
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            run_script(&source, &mut out, &mut io::stderr())
        }
        Commands::Check { file } => {
            let source = read_source(file.as_deref())?;
            check_script(&source, &mut io::stdout(), &mut io::stderr())
        }
        Commands::Repl { .. } => bail!("the REPL is started by the binary, not by execute()"),
        Commands::Settings {
            set_default_trie,
            set_history_file,
            set_max_history,
            set_banner,
            reset,
        } => {
            cmd_settings(
                config_path,
                SettingsUpdate {
                    default_trie: set_default_trie,
                    history_file: set_history_file,
                    max_history: set_max_history,
                    banner: set_banner,
                },
                reset,
            )?;
            Ok(true)
        }
    }
}

/// Read a whole script from `file`, or from stdin when `None`.
pub fn read_source(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            std::fs::read(path)
                .with_context(|| format!("Failed to read script: {}", path.display()))
        }
        None => {
            let mut source = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut source)
                .context("Failed to read script from standard input")?;
            Ok(source)
        }
    }
}

/// Run `source` in a fresh interpreter.
///
/// Results go to `out`; the first script error is written to
/// `diagnostics` in its `ERROR ...` form and yields `Ok(false)`. I/O
/// failures are returned as errors.
pub fn run_script(
    source: &[u8],
    out: &mut impl Write,
    diagnostics: &mut impl Write,
) -> Result<bool> {
    let mut interpreter = Interpreter::new();
    match interpreter.run(source, out) {
        Ok(executed) => {
            info!("executed {} statement(s)", executed);
            Ok(true)
        }
        Err(ScriptError::Io(e)) => Err(e).context("Failed to write results"),
        Err(e) => {
            writeln!(diagnostics, "{}", e)?;
            Ok(false)
        }
    }
}

/// Parse `source` without executing it.
pub fn check_script(
    source: &[u8],
    out: &mut impl Write,
    diagnostics: &mut impl Write,
) -> Result<bool> {
    match script::check(source) {
        Ok(count) => {
            writeln!(out, "{} {} statement(s)", "OK".green().bold(), count)?;
            Ok(true)
        }
        Err(ScriptError::Io(e)) => Err(e.into()),
        Err(e) => {
            writeln!(diagnostics, "{}", e)?;
            Ok(false)
        }
    }
}

/// Values given on the command line for `settings`.
#[derive(Debug, Default)]
struct SettingsUpdate {
    default_trie: Option<String>,
    history_file: Option<PathBuf>,
    max_history: Option<usize>,
    banner: Option<bool>,
}

/// Settings command
fn cmd_settings(config_path: Option<PathBuf>, update: SettingsUpdate, reset: bool) -> Result<()> {
    if reset {
        let config = PersistentConfig::default();
        config.save_to(config_path.clone())?;
        println!("{}", "Configuration reset to defaults".green().bold());
        println!();
        print_config(&config, config_path)?;
        return Ok(());
    }

    let mut config = PersistentConfig::load_from(config_path.clone())?;
    let changed = apply_settings(&mut config, update)?;

    if changed {
        config.save_to(config_path.clone())?;
        println!();
        println!("{}", "Configuration saved".green().bold());
    }

    println!();
    print_config(&config, config_path)
}

/// Apply `update` to `config`, returning whether anything changed.
fn apply_settings(config: &mut PersistentConfig, update: SettingsUpdate) -> Result<bool> {
    let mut changed = false;

    if let Some(id) = update.default_trie {
        if !script::is_identifier(&id) {
            bail!("'{}' is not a valid trie identifier", id);
        }
        println!("  Set default trie: {}", id.cyan());
        config.default_trie = Some(id);
        changed = true;
    }

    if let Some(path) = update.history_file {
        println!("  Set history file: {}", path.display().to_string().cyan());
        config.history_file = Some(path);
        changed = true;
    }

    if let Some(max) = update.max_history {
        config.max_history = Some(max);
        println!("  Set max history: {}", max.to_string().green());
        changed = true;
    }

    if let Some(banner) = update.banner {
        config.banner = Some(banner);
        println!("  Set banner: {}", banner.to_string().green());
        changed = true;
    }

    Ok(changed)
}

/// Print current configuration
fn print_config(config: &PersistentConfig, config_path: Option<PathBuf>) -> Result<()> {
    println!("{}", "Current Configuration:".bold().underline());
    println!();

    println!(
        "  Default Trie:  {}",
        config.default_trie.as_deref().unwrap_or("(none)").yellow()
    );

    let history = config
        .history_file
        .clone()
        .or_else(super::paths::default_history_path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(disabled)".to_string());
    println!("  History File:  {}", history.cyan());

    println!(
        "  Max History:   {}",
        config.max_history.unwrap_or(1000).to_string().yellow()
    );
    println!(
        "  Banner:        {}",
        if config.banner.unwrap_or(true) {
            "enabled".green()
        } else {
            "disabled".red()
        }
    );

    println!();
    println!(
        "  Config file: {}",
        config_file_path_with_override(config_path)?
            .display()
            .to_string()
            .cyan()
    );
    Ok(())
}

//! Default paths and configuration directory management

use crate::script::is_identifier;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the configuration directory for phone-forward
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("Could not determine local data directory")?;
    Ok(base.join("phone-forward"))
}

/// Get the default config file path, creating its directory
pub fn default_config_path() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    Ok(dir.join("config.json"))
}

/// Default REPL history file (`~/.phfwd_history`)
pub fn default_history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".phfwd_history"))
}

/// Get the config file path with optional override
pub fn config_file_path_with_override(custom_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom_path {
        validate_config_path(&path)?;
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(path)
    } else {
        default_config_path()
    }
}

/// Validate that a config file path has .json extension
pub fn validate_config_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Ok(()),
        Some(ext) => Err(anyhow::anyhow!(
            "Config file must have .json extension, got .{}. Please use a .json file.",
            ext
        )),
        None => Err(anyhow::anyhow!(
            "Config file must have .json extension. Please add .json to the filename."
        )),
    }
}

/// User configuration stored in config file
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PersistentConfig {
    /// Trie selected when the REPL starts
    pub default_trie: Option<String>,
    /// REPL history file
    pub history_file: Option<PathBuf>,
    /// Maximum REPL history entries
    pub max_history: Option<usize>,
    /// Print the REPL banner
    pub banner: Option<bool>,
}

impl PersistentConfig {
    /// Load configuration from custom path
    pub fn load_from(custom_path: Option<PathBuf>) -> Result<Self> {
        let path = config_file_path_with_override(custom_path)?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to custom path
    pub fn save_to(&self, custom_path: Option<PathBuf>) -> Result<()> {
        let path = config_file_path_with_override(custom_path)?;
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Check field values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = &self.default_trie {
            if !is_identifier(id) {
                anyhow::bail!("default_trie '{}' is not a valid trie identifier", id);
            }
        }
        Ok(())
    }

    /// Merge with command-line options (CLI options take precedence)
    pub fn merge_with_cli(
        &self,
        default_trie: Option<String>,
        history_file: Option<PathBuf>,
        banner: Option<bool>,
    ) -> Self {
        Self {
            default_trie: default_trie.or_else(|| self.default_trie.clone()),
            history_file: history_file.or_else(|| self.history_file.clone()),
            max_history: self.max_history,
            banner: banner.or(self.banner),
        }
    }
}

impl Default for PersistentConfig {
    fn default() -> Self {
        Self {
            default_trie: None,
            history_file: None,
            max_history: Some(1000),
            banner: Some(true),
        }
    }
}

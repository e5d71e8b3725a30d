//! Picker settings read from `config.json` in the platform config directory
//! (`~/.config/pdsc-picker/` on Linux).
//!
//! Two settings survive between runs: the color theme, and the descriptor
//! file name the picker looks for in the workspace root when neither
//! `--file` nor a lone `*.pdsc` candidate decides it. Search text and the
//! selected device belong to a single picker session and are never written.
//!
//! ```json
//! { "theme": "Nord", "source_file": "Keil.STM32F4xx_DFP.pdsc" }
//! ```
//!
//! A missing file means defaults. An unreadable or invalid file is reported
//! through `tracing` and also replaced by defaults, so a broken config never
//! blocks opening a descriptor.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_SOURCE_FILE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Built-in theme name, matched case-insensitively.
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Descriptor file name, relative to the workspace root.
    #[serde(default = "default_source_file")]
    pub source_file: String,
}

fn default_theme_name() -> String {
    "Catppuccin Mocha".to_string()
}

fn default_source_file() -> String {
    DEFAULT_SOURCE_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            source_file: default_source_file(),
        }
    }
}

impl Config {
    /// Settings from the user's config file, or defaults if it is absent or
    /// unusable.
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .check_source_file()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.check_source_file()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// `source_file` names a file directly inside the workspace root, so it
    /// must be a single non-empty path component.
    fn check_source_file(&self) -> Result<()> {
        let name = self.source_file.as_str();
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(std::path::Component::Normal(c)), None) if c == name => Ok(()),
            _ => bail!("source_file must be a plain file name, got '{}'", name),
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "pdsc-picker")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}

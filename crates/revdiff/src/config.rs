//! revdiff configuration

use crate::cli::OutputFormat;
use anyhow::Context;
use revdiff_core::{DiffEngine, Granularity, DEFAULT_CONTEXT_LINES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from `config.toml`. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unchanged lines kept on each side of a change
    pub context_lines: usize,
    /// Unit for similarity scoring and inline spans
    pub granularity: Granularity,
    /// Color text output when writing to a terminal
    pub color: bool,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
            granularity: Granularity::Char,
            color: true,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("invalid config in {}", config_path.display()))?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("revdiff").join("config.toml"))
    }

    pub fn engine(&self) -> DiffEngine {
        DiffEngine::new()
            .with_context(self.context_lines)
            .with_granularity(self.granularity)
    }

    pub fn with_context_lines(mut self, lines: Option<usize>) -> Self {
        if let Some(lines) = lines {
            self.context_lines = lines;
        }
        self
    }

    pub fn with_granularity(mut self, granularity: Option<Granularity>) -> Self {
        if let Some(granularity) = granularity {
            self.granularity = granularity;
        }
        self
    }

    pub fn with_format(mut self, format: Option<OutputFormat>) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    pub fn without_color(mut self, disabled: bool) -> Self {
        if disabled {
            self.color = false;
        }
        self
    }
}

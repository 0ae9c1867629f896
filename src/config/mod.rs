//! Engine configuration
//!
//! Loaded from `~/.sweetexp/config.toml`. The only hard switch is `enabled`:
//! the engine does no work at all, and persists nothing, while it is false.
//! Everything else has a usable default so a config file containing just
//! `enabled = true` is valid.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Worker loop cadences in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intervals {
    /// Achievement progress check period
    pub check_ms: u64,
    /// Notification dispatch period
    pub dispatch_ms: u64,
    /// Simulated activity tap period
    pub activity_ms: u64,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            check_ms: 5000,
            dispatch_ms: 2000,
            activity_ms: 5000,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Master switch: no workers run while this is false
    pub enabled: bool,
    /// Persisted achievement state
    pub data_path: PathBuf,
    /// Unix socket of the external notification consumer
    pub socket_path: PathBuf,
    /// System counter file watched by the OS activity tap
    pub system_counter_path: PathBuf,
    /// Chance (percent per dispatch tick) of an ambient notification
    pub ambient_chance_pct: u8,
    pub intervals: Intervals,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Missing config means disabled; `sweetexpd init` writes an
            // enabled one explicitly.
            enabled: false,
            data_path: Self::default_dir().join("data").join("sweetexp_enginedata.dat"),
            socket_path: PathBuf::from("/tmp/notifengine.sock"),
            system_counter_path: PathBuf::from("/proc/stat"),
            ambient_chance_pct: 5,
            intervals: Intervals::default(),
        }
    }
}

impl Config {
    /// Get the global config directory path (~/.sweetexp/)
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sweetexp")
    }

    /// Get the global config file path (~/.sweetexp/config.toml)
    pub fn default_path() -> PathBuf {
        Self::default_dir().join("config.toml")
    }

    /// Load configuration from a file.
    ///
    /// A missing file is not an error: it yields the default (disabled)
    /// configuration, matching the absent-config-means-disabled contract.
    /// A present but unparseable file is an error so a reload path can keep
    /// its previous configuration instead of silently disabling the engine.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Config file not found at {}, engine disabled",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a file with an atomic write (temp file +
    /// rename), creating the parent directory if needed.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

        Ok(())
    }

    /// Create the data directory if it does not exist yet.
    pub fn ensure_dirs(&self) -> Result<()> {
        if let Some(parent) = self.data_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }
        Ok(())
    }
}

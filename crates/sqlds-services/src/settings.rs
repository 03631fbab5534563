//! Settings file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join("sqlds"))
}

pub fn settings_file() -> Result<PathBuf> {
    config_dir().map(|p| p.join("settings.toml"))
}

/// Settings for the column services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// How long fetched column lists and schemas stay cached, in seconds
    pub cache_ttl_secs: u64,
    /// Whether column pickers ask for orderable columns only
    pub orderable_default: bool,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: Option<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            cache_ttl_secs: sqlds_schema::DEFAULT_CACHE_TTL.as_secs(),
            orderable_default: false,
            log_filter: None,
        }
    }
}

impl ServiceSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid settings file")
    }

    /// Load settings from `path`, or from the default settings file.
    ///
    /// A missing default file yields the defaults; a missing explicit path
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (settings_file()?, false),
        };

        if !explicit && !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;
        let settings = Self::from_toml(&text)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}

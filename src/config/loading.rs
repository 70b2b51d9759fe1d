//! Configuration loading from TOML files
//!
//! Environment and command-line overrides are layered on top by
//! [`crate::args::Args::apply_to`].

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::types::Config;

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from a TOML file
    File(PathBuf),
    /// No file present; built-in defaults plus overrides
    Defaults,
}

impl ConfigSource {
    /// Human-readable description for startup logs
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::File(path) => format!("config file '{}'", path.display()),
            Self::Defaults => "defaults (no config file)".to_string(),
        }
    }
}

/// Load configuration from a TOML file
///
/// The file is not validated here; transport and interval checks run once
/// all overrides have been applied.
pub fn load_config(config_path: impl AsRef<Path>) -> Result<Config> {
    let config_path = config_path.as_ref();
    let config_content = std::fs::read_to_string(config_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read config file '{}': {}",
            config_path.display(),
            e
        )
    })?;

    toml::from_str(&config_content).map_err(|e| {
        anyhow::anyhow!(
            "Failed to parse config file '{}': {}",
            config_path.display(),
            e
        )
    })
}

/// Load configuration from a file if it exists, otherwise start from defaults
///
/// A missing file is not an error: a deployment may configure everything
/// through environment variables. A file that exists but cannot be read or
/// parsed is.
pub fn load_config_with_fallback(config_path: impl AsRef<Path>) -> Result<(Config, ConfigSource)> {
    let config_path = config_path.as_ref();
    if config_path.exists() {
        let config = load_config(config_path)?;
        return Ok((config, ConfigSource::File(config_path.to_path_buf())));
    }

    tracing::debug!(
        "Config file '{}' not found, using defaults",
        config_path.display()
    );
    Ok((Config::default(), ConfigSource::Defaults))
}

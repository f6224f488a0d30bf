//! Configuration loading and flag/file merging.

use std::fs;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::config::schema::{AppConfig, BuildInfo, FileConfig, DEFAULT_SHUTDOWN_TIMEOUT};

/// Errors while loading or validating the config file. All of them are
/// fatal at startup, before any listener exists.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for the expected schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    Validation(String),
}

/// Load and validate a TOML config file.
pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_file(&content)
}

fn parse_file(content: &str) -> Result<FileConfig, ConfigError> {
    let config: FileConfig = toml::from_str(content)?;

    if config.shutdown_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "shutdown_timeout_secs must be greater than zero".to_string(),
        ));
    }

    Ok(config)
}

/// Merge command-line values over file values over built-in defaults.
pub fn merge(cli_ports: Option<String>, file: FileConfig) -> AppConfig {
    AppConfig {
        ports: cli_ports.or(file.ports),
        shutdown_timeout: file
            .shutdown_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT),
        build: BuildInfo::current(),
    }
}

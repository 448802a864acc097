use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

use coords::geodesy::mgrs::{MAX_PRECISION, MIN_PRECISION};

use crate::error::CliError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Digits per axis for `coords mgrs` when `--precision` is not given
    pub mgrs_precision: u8,
    pub output: OutputFormat,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated, one line per input
    Text,
    /// One JSON object per input
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl CliConfig {
    /// Load configuration from coords.toml and environment variables.
    ///
    /// An explicit `path` must exist and replaces the default search paths.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        // Compile-time defaults fill in any key missing from files/env
        let defaults = config::Config::try_from(&CliConfig::default())
            .context("Failed to serialize default configuration")?;

        let mut builder = config::Config::builder()
            .add_source(defaults);

        match path {
            Some(path) => {
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                // 1. /etc/coords/coords.toml (system-wide)
                // 2. config/coords.toml (working directory)
                for path in ["/etc/coords/coords", "config/coords"] {
                    builder = builder.add_source(config::File::with_name(path).required(false));
                }
            }
        }

        // Environment overrides everything: COORDS_MGRS_PRECISION, COORDS_LOGGING__LEVEL
        builder = builder.add_source(
            config::Environment::with_prefix("COORDS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), CliError> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&self.mgrs_precision) {
            return Err(CliError::InvalidConfig(format!(
                "mgrs_precision must be between {MIN_PRECISION} and {MAX_PRECISION}, got {}",
                self.mgrs_precision
            )));
        }

        if self.logging.level.trim().is_empty() {
            return Err(CliError::InvalidConfig("logging.level must not be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            mgrs_precision: MAX_PRECISION,
            output: OutputFormat::Text,
            logging: LoggingConfig {
                level: "coords=info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}

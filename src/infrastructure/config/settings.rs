//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. The file
//! holds no secrets; the FootyStats API key is read from the environment by the
//! commands that need it.
//!
//! # Example
//!
//! ```no_run
//! use picks_ledger::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::analytics::AnalyticsConfig;
use super::league::LeagueTable;
use super::logging::LoggingConfig;
use crate::adapter::outbound::footystats::SourceConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Path of the pick ledger CSV.
    #[serde(default = "default_ledger_path")]
    pub ledger: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Match data source settings.
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Tracked leagues, keyed by the name used on the command line.
    #[serde(default)]
    pub leagues: LeagueTable,
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("data/results/picks.csv")
}

impl Config {
    /// Parse and validate configuration from TOML content.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Check field values after parsing.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.ledger.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "ledger" });
        }
        if self.source.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "source.api_url",
            });
        }
        if self.source.retry_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "source.retry_max_attempts",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.source.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "source.timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.analytics.top_patterns == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analytics.top_patterns",
                reason: "must be greater than 0".to_string(),
            });
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            });
        }
        self.leagues.validate()
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

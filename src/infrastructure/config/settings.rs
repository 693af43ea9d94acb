//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the database path can be
//! overridden with the `FEASTFAIR_DATABASE` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use feastfair::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("feastfair.toml")?;
//!     config.init_logging(0);
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::application::pricing::PricingConfig;
use crate::error::{ConfigError, Result};

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "feastfair.toml";

/// Environment variable overriding [`Config::database`].
pub const DATABASE_ENV: &str = "FEASTFAIR_DATABASE";

/// Largest accepted `pricing.round_dp`.
const MAX_ROUND_DP: u32 = 10;

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to "feastfair.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Optimization defaults; CLI flags override them per run.
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            pricing: PricingConfig::default(),
        }
    }
}

fn default_database_path() -> String {
    "feastfair.db".to_string()
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path`, falling back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for a file that exists.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(ConfigError::ReadFile(e).into()),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(database) = std::env::var(DATABASE_ENV) {
            if !database.trim().is_empty() {
                self.database = database;
            }
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database",
                reason: "path cannot be empty".to_string(),
            }
            .into());
        }
        if self.pricing.grid_points < 2 {
            return Err(ConfigError::InvalidValue {
                field: "grid_points",
                reason: "must be at least 2".to_string(),
            }
            .into());
        }
        if self.pricing.round_dp > MAX_ROUND_DP {
            return Err(ConfigError::InvalidValue {
                field: "round_dp",
                reason: format!("must be {MAX_ROUND_DP} or less"),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging based on configuration and `-v` count.
    pub fn init_logging(&self, verbose: u8) {
        self.logging.init(verbose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricingMethod;
    use crate::error::Error;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.pricing, PricingConfig::default());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn pricing_section_is_parsed() {
        let config = Config::parse_toml(
            r#"
            [pricing]
            method = "grid-search"
            grid_points = 25
            round_dp = 3
            enforce_inventory = true
            "#,
        )
        .unwrap();
        assert_eq!(config.pricing.method, PricingMethod::GridSearch);
        assert_eq!(config.pricing.grid_points, 25);
        assert_eq!(config.pricing.round_dp, 3);
        assert!(config.pricing.enforce_inventory);
    }

    #[test]
    fn rejects_single_grid_point() {
        let result = Config::parse_toml("[pricing]\ngrid_points = 1\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "grid_points",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_excessive_rounding() {
        let result = Config::parse_toml("[pricing]\nround_dp = 11\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "round_dp",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_unknown_method() {
        let result = Config::parse_toml("[pricing]\nmethod = \"magic\"\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = Config::parse_toml("[logging]\nformat = \"xml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn missing_default_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.pricing.grid_points, 100);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
    }
}

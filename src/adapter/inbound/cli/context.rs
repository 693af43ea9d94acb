//! Configuration and store resolution shared by command handlers.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection;
use crate::adapter::outbound::sqlite::SqliteStore;
use crate::error::Result;
use crate::infrastructure::config::{Config, DEFAULT_CONFIG_PATH};

/// Loaded configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
}

impl Context {
    /// Load configuration for a command.
    ///
    /// Without `--config` a missing `feastfair.toml` means defaults; an
    /// explicitly named file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (config, config_path) = match explicit {
            Some(path) => (Config::load(path)?, path.to_path_buf()),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                (Config::load_or_default(&path)?, path)
            }
        };
        Ok(Self {
            config,
            config_path,
        })
    }

    /// Open the configured SQLite database, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_store(&self) -> Result<SqliteStore> {
        debug!(database = %self.config.database, "Opening database");
        let pool = connection::open(&self.config.database)?;
        Ok(SqliteStore::new(pool))
    }
}

/// Path `init` writes to: `--config` when given, else the default.
#[must_use]
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};

    #[test]
    fn explicit_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Context::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
    }

    #[test]
    fn explicit_config_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feastfair.toml");
        std::fs::write(&path, "[pricing]\ngrid_points = 7\n").unwrap();

        let context = Context::load(Some(&path)).unwrap();
        assert_eq!(context.config.pricing.grid_points, 7);
        assert_eq!(context.config_path, path);
    }

    #[test]
    fn config_path_defaults_to_local_file() {
        assert_eq!(config_path(None), PathBuf::from("feastfair.toml"));
    }
}

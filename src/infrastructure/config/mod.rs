//! Infrastructure configuration modules.

pub mod logging;
pub mod settings;

pub use logging::LoggingConfig;
pub use settings::{Config, DATABASE_ENV, DEFAULT_CONFIG_PATH};

//! Handlers for `init` and the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::context::Context;
use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::DATABASE_ENV;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../feastfair.toml.example");

/// Execute `init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, CONFIG_TEMPLATE)?;

    if output::is_json() {
        output::json_output(json!({ "command": "init", "path": path.display().to_string() }));
        return Ok(());
    }
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} to taste", path.display()));
    output::note("2. Run: feastfair seed (or add items with feastfair item add)");
    output::note("3. Run: feastfair optimize");
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(context: &Context) -> Result<()> {
    let config = &context.config;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": context.config_path.display().to_string(),
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("File", context.config_path.display());
    output::field("Database", &config.database);
    if std::env::var_os(DATABASE_ENV).is_some() {
        output::note(&format!("database path taken from {DATABASE_ENV}"));
    }

    output::section("Pricing");
    output::field("Method", config.pricing.method);
    output::field("Grid points", config.pricing.grid_points);
    output::field("Decimal places", config.pricing.round_dp);
    output::field(
        "Inventory",
        if config.pricing.enforce_inventory {
            "enforced"
        } else {
            "reported only"
        },
    );

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}

/// Execute `config validate`.
///
/// Loading the [`Context`] already validated the file, so reaching this
/// handler means it is valid.
pub fn execute_validate(context: &Context) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": context.config_path.display().to_string(),
            "valid": true,
        }));
        return Ok(());
    }

    output::section("Config Validation");
    output::field("Path", context.config_path.display());
    if context.config_path.exists() {
        output::success("Config file is valid");
    } else {
        output::warning("No config file found; built-in defaults are in effect");
        output::hint(&format!("run {}", output::highlight("feastfair init")));
    }
    Ok(())
}

//! Confirmation prompts for destructive commands.

use std::io::IsTerminal;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};

/// Ask the operator to confirm `prompt`, or accept immediately with `--yes`.
///
/// Without a terminal to ask on, the command is refused rather than assumed.
///
/// # Errors
///
/// Returns an error when stdin is not interactive or the prompt fails.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if output::is_json() || !std::io::stdin().is_terminal() {
        return Err(ConfigError::InvalidValue {
            field: "yes",
            reason: "confirmation needs an interactive terminal; pass --yes".to_string(),
        }
        .into());
    }

    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{mask_key, Config, ModeSetting};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub async fn execute_config(
    args: ConfigArgs,
    config: &mut Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(config, path),
        ConfigAction::SetMode { mode } => {
            let mode = ModeSetting::from(mode);
            config.mode = mode;
            config.save_to(path)?;
            println!(
                "{}",
                formatter.success(&format!("Default mode set to {}", mode.as_str()))
            );
            Ok(())
        }
        ConfigAction::SetKey { key } => {
            set_key(config, key)?;
            config.save_to(path)?;
            let masked = config.api_key.as_deref().map(mask_key).unwrap_or_default();
            println!("{}", formatter.success(&format!("API key stored ({})", masked)));
            Ok(())
        }
    }
}

fn show_config(config: &Config, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(&config.redacted())
        .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
    println!("# {}", path.display());
    println!("{}", contents);
    Ok(())
}

fn set_key(config: &mut Config, key: String) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidInput("API key must not be empty".to_string()));
    }
    config.api_key = Some(key.to_string());
    Ok(())
}

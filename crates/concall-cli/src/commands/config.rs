//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{ConcallConfig, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// `path` is where `init` writes; `config` is the configuration already in effect.
pub fn execute_config(
    args: ConfigArgs,
    path: &Path,
    config: &ConcallConfig,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let shown = config.redacted();
            let rendered = match formatter.format() {
                OutputFormat::Json => serde_json::to_string_pretty(&shown)?,
                OutputFormat::Table | OutputFormat::Quiet => shown.to_toml()?,
            };
            println!("{}", rendered);
        }
        ConfigAction::Init { force } => {
            init_config(path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
        }
    }

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }
    ConcallConfig::default().save_to(path)
}

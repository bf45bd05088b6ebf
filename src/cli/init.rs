//! Init command implementation

use std::path::Path;

use anyhow::{Result, bail};

use zikir::config::Config;

/// Write a config file holding the built-in reward tables.
///
/// The file is a starting point for tuning levels, badges and milestones.
pub async fn init_command(config_override: Option<&Path>, force: bool) -> Result<()> {
    let config_path = config_override
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    // http_token stays empty for local use
    Config::default().save_to_file(&config_path)?;
    println!("Created: {}", config_path.display());

    Ok(())
}

//! Login command - verify credentials and store them.

use std::path::Path;

use console::style;
use tracing::info;

use ptero_core::config::AppConfig;
use ptero_core::error::PteroResult;

use super::print_json;
use crate::OutputFormat;

/// Check the configured credentials with an account lookup, then save them.
pub async fn run(config: &AppConfig, config_path: &Path, format: OutputFormat) -> PteroResult<()> {
    let client = super::create_client(config)?;
    let account = client.account().details().await?;

    config.save_to_file(config_path)?;
    info!("saved panel credentials to {}", config_path.display());

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "username": account.username,
            "base_url": config.panel.auth.base_url,
            "config": config_path.display().to_string(),
        })),
        OutputFormat::Text => {
            println!(
                "{} Logged in to {} as {}",
                style("✓").green(),
                config.panel.auth.base_url,
                style(&account.username).bold()
            );
            println!("  Saved to {}", config_path.display());
        }
    }
    Ok(())
}

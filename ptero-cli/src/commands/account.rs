//! Account command - profile details and client API keys.

use clap::Subcommand;
use console::style;

use ptero_core::config::AppConfig;
use ptero_core::error::PteroResult;

use super::{new_table, print_json, truncate};
use crate::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum AccountAction {
    /// Show the account behind the API key.
    Show,
    /// Fetch two-factor setup data.
    TwoFactor,
    /// Change the account email.
    Email {
        email: String,
        /// Current password.
        #[arg(long)]
        password: String,
    },
    /// Change the account password.
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    /// List API keys.
    Keys,
    /// Create an API key.
    CreateKey {
        description: String,
        /// Allowed source IPs (repeatable).
        #[arg(long = "allow-ip")]
        allowed_ips: Vec<String>,
    },
    /// Revoke an API key.
    DeleteKey {
        identifier: String,
    },
}

/// Run an account subcommand.
pub async fn run(config: &AppConfig, action: AccountAction, format: OutputFormat) -> PteroResult<()> {
    let client = super::create_client(config)?;
    let account = client.account();

    match action {
        AccountAction::Show => {
            let details = account.details().await?;
            match format {
                OutputFormat::Json => print_json(&details),
                OutputFormat::Text => {
                    println!(
                        "{} {} ({})",
                        style(&details.first_name).bold(),
                        style(&details.last_name).bold(),
                        details.username
                    );
                    println!("  Email:    {}", details.email);
                    println!("  Language: {}", details.language);
                    if details.admin {
                        println!("  {}", style("Administrator").cyan());
                    }
                }
            }
        }
        AccountAction::TwoFactor => {
            let setup = account.two_factor_qr().await?;
            match format {
                OutputFormat::Json => print_json(&setup),
                OutputFormat::Text => {
                    println!("{}", setup.image_url_data);
                    if let Some(secret) = &setup.secret {
                        println!("Secret: {secret}");
                    }
                }
            }
        }
        AccountAction::Email { email, password } => {
            account.update_email(&email, &password).await?;
            println!("{} Email changed to {email}", style("✓").green());
        }
        AccountAction::Password {
            current,
            new,
            confirm,
        } => {
            account.update_password(&current, &new, &confirm).await?;
            println!("{} Password updated", style("✓").green());
        }
        AccountAction::Keys => {
            let keys = account.api_keys().await?;
            match format {
                OutputFormat::Json => print_json(&keys),
                OutputFormat::Text => {
                    if keys.is_empty() {
                        println!("No API keys.");
                        return Ok(());
                    }
                    let mut table = new_table(vec!["Identifier", "Description", "Allowed IPs", "Last used"]);
                    for k in &keys {
                        let last_used = k
                            .last_used_at
                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_else(|| "never".to_string());
                        let ips = if k.allowed_ips.is_empty() {
                            "any".to_string()
                        } else {
                            k.allowed_ips.join(", ")
                        };
                        table.add_row(vec![
                            k.identifier.clone(),
                            truncate(&k.description, 40),
                            ips,
                            last_used,
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
        AccountAction::CreateKey {
            description,
            allowed_ips,
        } => {
            let ips: Vec<&str> = allowed_ips.iter().map(String::as_str).collect();
            let created = account.create_api_key(&description, &ips).await?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "key": created.key,
                    "token": created.token(),
                })),
                OutputFormat::Text => {
                    println!("{} Created key {}", style("✓").green(), created.key.identifier);
                    println!("  Token: {}", style(created.token()).bold());
                    println!("  {}", style("The token is only shown once.").dim());
                }
            }
        }
        AccountAction::DeleteKey { identifier } => {
            account.delete_api_key(&identifier).await?;
            println!("{} Revoked {identifier}", style("✓").green());
        }
    }

    Ok(())
}

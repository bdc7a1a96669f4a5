//! Backups command - create, list, restore and remove server backups.

use clap::Subcommand;
use console::style;

use ptero_api::CreateBackupOptions;
use ptero_core::config::AppConfig;
use ptero_core::error::PteroResult;

use super::{format_bytes, new_table, print_json};
use crate::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum BackupsAction {
    /// List a server's backups.
    List {
        server: String,
    },
    /// Start a new backup.
    Create {
        server: String,
        /// Backup name.
        #[arg(long)]
        name: Option<String>,
        /// Paths to exclude (repeatable).
        #[arg(long = "ignore")]
        ignored: Vec<String>,
        /// Lock the backup against deletion.
        #[arg(long)]
        locked: bool,
    },
    /// Show one backup.
    Get {
        server: String,
        backup: String,
    },
    /// Get a signed download URL.
    Download {
        server: String,
        backup: String,
    },
    /// Toggle the backup's lock.
    Lock {
        server: String,
        backup: String,
    },
    /// Restore a backup onto the server.
    Restore {
        server: String,
        backup: String,
        /// Delete all files before restoring.
        #[arg(long)]
        truncate: bool,
    },
    /// Delete a backup.
    Delete {
        server: String,
        backup: String,
    },
}

/// Run a backups subcommand.
pub async fn run(config: &AppConfig, action: BackupsAction, format: OutputFormat) -> PteroResult<()> {
    let client = super::create_client(config)?;
    let backups = client.backups();

    match action {
        BackupsAction::List { server } => {
            let list = backups.list(&server).await?;
            match format {
                OutputFormat::Json => print_json(&list),
                OutputFormat::Text => {
                    if list.is_empty() {
                        println!("No backups for {server}.");
                        return Ok(());
                    }
                    let mut table = new_table(vec!["UUID", "Name", "Size", "Created", "Status"]);
                    for b in list.iter() {
                        let status = if b.is_pending() {
                            "pending"
                        } else if !b.is_successful {
                            "failed"
                        } else if b.is_locked {
                            "locked"
                        } else {
                            "ok"
                        };
                        let created = b
                            .created_at
                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default();
                        table.add_row(vec![
                            b.uuid.clone(),
                            b.name.clone(),
                            format_bytes(b.bytes),
                            created,
                            status.to_string(),
                        ]);
                    }
                    println!("{table}");
                    if let Some(count) = list.meta.as_ref().and_then(|m| m.backup_count) {
                        println!("{}", style(format!("{count} backup(s) on server")).dim());
                    }
                }
            }
        }
        BackupsAction::Create {
            server,
            name,
            ignored,
            locked,
        } => {
            let mut options = match name {
                Some(name) => CreateBackupOptions::named(name),
                None => CreateBackupOptions::default(),
            };
            if !ignored.is_empty() {
                let patterns: Vec<&str> = ignored.iter().map(String::as_str).collect();
                options = options.ignore(&patterns);
            }
            if locked {
                options = options.locked(true);
            }
            let backup = backups.create(&server, &options).await?;
            match format {
                OutputFormat::Json => print_json(&backup),
                OutputFormat::Text => println!(
                    "{} Backup {} ({}) started",
                    style("✓").green(),
                    backup.name,
                    backup.uuid
                ),
            }
        }
        BackupsAction::Get { server, backup } => {
            let b = backups.get(&server, &backup).await?;
            match format {
                OutputFormat::Json => print_json(&b),
                OutputFormat::Text => {
                    println!("{}", style(&b.name).bold());
                    println!("  UUID:     {}", b.uuid);
                    println!("  Size:     {}", format_bytes(b.bytes));
                    println!("  Locked:   {}", b.is_locked);
                    println!("  Checksum: {}", b.checksum.as_deref().unwrap_or("-"));
                    if !b.ignored_files.is_empty() {
                        println!("  Ignored:  {}", b.ignored_files.join(", "));
                    }
                }
            }
        }
        BackupsAction::Download { server, backup } => {
            let url = backups.download_url(&server, &backup).await?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({ "url": url })),
                OutputFormat::Text => println!("{url}"),
            }
        }
        BackupsAction::Lock { server, backup } => {
            let b = backups.toggle_lock(&server, &backup).await?;
            let state = if b.is_locked { "locked" } else { "unlocked" };
            println!("{} Backup {} is now {state}", style("✓").green(), b.uuid);
        }
        BackupsAction::Restore {
            server,
            backup,
            truncate,
        } => {
            backups.restore(&server, &backup, truncate).await?;
            println!("{} Restoring {backup} onto {server}", style("✓").green());
        }
        BackupsAction::Delete { server, backup } => {
            backups.delete(&server, &backup).await?;
            println!("{} Deleted backup {backup}", style("✓").green());
        }
    }

    Ok(())
}

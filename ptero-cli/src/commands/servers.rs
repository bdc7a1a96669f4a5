//! Servers command - list, inspect and control servers.

use clap::Subcommand;
use console::style;

use ptero_api::PowerSignal;
use ptero_core::config::AppConfig;
use ptero_core::error::PteroResult;

use super::{format_bytes, format_limit_mb, new_table, print_json, truncate};
use crate::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum ServersAction {
    /// List servers visible to the API key.
    List,
    /// Show one server's details.
    Get {
        /// Server identifier.
        server: String,
    },
    /// Show live resource usage.
    Resources {
        /// Server identifier.
        server: String,
    },
    /// Send a power signal (start, stop, restart, kill).
    Power {
        /// Server identifier.
        server: String,
        /// Power signal.
        signal: String,
    },
    /// Run a console command.
    Command {
        /// Server identifier.
        server: String,
        /// Command line to send to the console.
        command: String,
    },
    /// Rename a server.
    Rename {
        /// Server identifier.
        server: String,
        /// New name.
        name: String,
    },
    /// Reinstall a server.
    Reinstall {
        /// Server identifier.
        server: String,
    },
}

/// Run a servers subcommand.
pub async fn run(config: &AppConfig, action: ServersAction, format: OutputFormat) -> PteroResult<()> {
    let client = super::create_client(config)?;
    let servers = client.servers();

    match action {
        ServersAction::List => {
            let list = servers.list().await?;
            match format {
                OutputFormat::Json => print_json(&list.data),
                OutputFormat::Text => {
                    if list.is_empty() {
                        println!("No servers found.");
                        return Ok(());
                    }
                    let mut table = new_table(vec!["ID", "Name", "Node", "Memory", "Disk", "State"]);
                    for s in list.iter() {
                        let state = if s.is_suspended {
                            "suspended".to_string()
                        } else if s.is_installing {
                            "installing".to_string()
                        } else {
                            s.status.clone().unwrap_or_else(|| "ok".to_string())
                        };
                        table.add_row(vec![
                            s.identifier.clone(),
                            truncate(&s.name, 32),
                            s.node.clone(),
                            format_limit_mb(s.limits.memory),
                            format_limit_mb(s.limits.disk),
                            state,
                        ]);
                    }
                    println!("{table}");
                    if let Some(p) = list.pagination() {
                        println!(
                            "{}",
                            style(format!(
                                "Page {}/{} ({} total)",
                                p.current_page, p.total_pages, p.total
                            ))
                            .dim()
                        );
                    }
                }
            }
        }
        ServersAction::Get { server } => {
            let s = servers.get(&server).await?;
            match format {
                OutputFormat::Json => print_json(&s),
                OutputFormat::Text => {
                    println!("{}", style(&s.name).bold());
                    println!("  Identifier:  {}", s.identifier);
                    println!("  UUID:        {}", s.uuid);
                    println!("  Node:        {}", s.node);
                    if !s.description.is_empty() {
                        println!("  Description: {}", s.description);
                    }
                    if let Some(sftp) = &s.sftp_details {
                        println!("  SFTP:        {}:{}", sftp.ip, sftp.port);
                    }
                    println!("  Memory:      {}", format_limit_mb(s.limits.memory));
                    println!("  Disk:        {}", format_limit_mb(s.limits.disk));
                    println!("  CPU:         {}%", s.limits.cpu);
                    println!(
                        "  Features:    {} databases, {} allocations, {} backups",
                        s.feature_limits.databases,
                        s.feature_limits.allocations,
                        s.feature_limits.backups
                    );
                    if s.is_suspended {
                        println!("  {}", style("Suspended").red());
                    }
                }
            }
        }
        ServersAction::Resources { server } => {
            let usage = servers.resources(&server).await?;
            match format {
                OutputFormat::Json => print_json(&usage),
                OutputFormat::Text => {
                    let r = &usage.resources;
                    let state = match usage.current_state.as_str() {
                        "running" => style(usage.current_state.clone()).green(),
                        "offline" => style(usage.current_state.clone()).red(),
                        _ => style(usage.current_state.clone()).yellow(),
                    };
                    println!("State:   {state}");
                    println!("CPU:     {:.1}%", r.cpu_absolute);
                    println!("Memory:  {}", format_bytes(r.memory_bytes));
                    println!("Disk:    {}", format_bytes(r.disk_bytes));
                    println!(
                        "Network: {} in / {} out",
                        format_bytes(r.network_rx_bytes),
                        format_bytes(r.network_tx_bytes)
                    );
                    println!("Uptime:  {}s", r.uptime / 1000);
                }
            }
        }
        ServersAction::Power { server, signal } => {
            let signal: PowerSignal = signal.parse()?;
            servers.power(&server, signal).await?;
            println!("{} Sent '{signal}' to {server}", style("✓").green());
        }
        ServersAction::Command { server, command } => {
            servers.send_command(&server, &command).await?;
            println!("{} Command sent to {server}", style("✓").green());
        }
        ServersAction::Rename { server, name } => {
            servers.rename(&server, &name).await?;
            println!("{} Renamed {server} to '{name}'", style("✓").green());
        }
        ServersAction::Reinstall { server } => {
            servers.reinstall(&server).await?;
            println!("{} Reinstall started for {server}", style("✓").green());
        }
    }

    Ok(())
}

//! Files command - browse and edit server files.

use std::path::PathBuf;

use clap::Subcommand;
use console::style;

use ptero_core::config::AppConfig;
use ptero_core::error::PteroResult;

use super::{format_bytes, new_table, print_json};
use crate::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum FilesAction {
    /// List a directory.
    List {
        server: String,
        /// Directory to list.
        #[arg(default_value = "/")]
        directory: String,
    },
    /// Print a file's contents.
    Cat {
        server: String,
        file: String,
    },
    /// Write a file from a local path or inline text.
    Write {
        server: String,
        /// Remote file path.
        file: String,
        /// Local file to upload.
        #[arg(long, conflicts_with = "text")]
        from: Option<PathBuf>,
        /// Inline contents.
        #[arg(long)]
        text: Option<String>,
    },
    /// Get a signed download URL for a file.
    Download {
        server: String,
        file: String,
    },
    /// Get a signed upload URL.
    Upload {
        server: String,
    },
    /// Rename or move a file within a directory.
    Rename {
        server: String,
        from: String,
        to: String,
        #[arg(long, default_value = "/")]
        root: String,
    },
    /// Duplicate a file.
    Copy {
        server: String,
        location: String,
    },
    /// Archive files.
    Compress {
        server: String,
        #[arg(required = true)]
        files: Vec<String>,
        #[arg(long, default_value = "/")]
        root: String,
    },
    /// Extract an archive.
    Decompress {
        server: String,
        file: String,
        #[arg(long, default_value = "/")]
        root: String,
    },
    /// Delete files.
    Delete {
        server: String,
        #[arg(required = true)]
        files: Vec<String>,
        #[arg(long, default_value = "/")]
        root: String,
    },
    /// Create a directory.
    Mkdir {
        server: String,
        name: String,
        #[arg(long, default_value = "/")]
        root: String,
    },
}

/// Run a files subcommand.
pub async fn run(config: &AppConfig, action: FilesAction, format: OutputFormat) -> PteroResult<()> {
    let client = super::create_client(config)?;
    let files = client.files();

    match action {
        FilesAction::List { server, directory } => {
            let entries = files.list(&server, &directory).await?;
            match format {
                OutputFormat::Json => print_json(&entries),
                OutputFormat::Text => {
                    if entries.is_empty() {
                        println!("{directory} is empty.");
                        return Ok(());
                    }
                    let mut table = new_table(vec!["Name", "Mode", "Size", "Modified"]);
                    for f in &entries {
                        let name = if f.is_directory() {
                            format!("{}/", f.name)
                        } else {
                            f.name.clone()
                        };
                        let size = if f.is_directory() {
                            "-".to_string()
                        } else {
                            format_bytes(f.size)
                        };
                        let modified = f
                            .modified_at
                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default();
                        table.add_row(vec![name, f.mode.clone(), size, modified]);
                    }
                    println!("{table}");
                }
            }
        }
        FilesAction::Cat { server, file } => {
            let contents = files.contents(&server, &file).await?;
            print!("{contents}");
        }
        FilesAction::Write {
            server,
            file,
            from,
            text,
        } => {
            let contents = match (from, text) {
                (Some(path), _) => std::fs::read_to_string(path)?,
                (None, Some(text)) => text,
                (None, None) => String::new(),
            };
            files.write(&server, &file, &contents).await?;
            println!(
                "{} Wrote {} to {file}",
                style("✓").green(),
                format_bytes(contents.len() as u64)
            );
        }
        FilesAction::Download { server, file } => {
            let url = files.download_url(&server, &file).await?;
            emit_url(&url, format);
        }
        FilesAction::Upload { server } => {
            let url = files.upload_url(&server).await?;
            emit_url(&url, format);
        }
        FilesAction::Rename {
            server,
            from,
            to,
            root,
        } => {
            files.rename(&server, &root, &from, &to).await?;
            println!("{} Renamed {from} to {to}", style("✓").green());
        }
        FilesAction::Copy { server, location } => {
            files.copy(&server, &location).await?;
            println!("{} Copied {location}", style("✓").green());
        }
        FilesAction::Compress {
            server,
            files: names,
            root,
        } => {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let archive = files.compress(&server, &root, &names).await?;
            match format {
                OutputFormat::Json => print_json(&archive),
                OutputFormat::Text => println!(
                    "{} Created {} ({})",
                    style("✓").green(),
                    archive.name,
                    format_bytes(archive.size)
                ),
            }
        }
        FilesAction::Decompress { server, file, root } => {
            files.decompress(&server, &root, &file).await?;
            println!("{} Extracted {file}", style("✓").green());
        }
        FilesAction::Delete {
            server,
            files: names,
            root,
        } => {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            files.delete(&server, &root, &names).await?;
            println!("{} Deleted {} file(s)", style("✓").green(), names.len());
        }
        FilesAction::Mkdir { server, name, root } => {
            files.create_folder(&server, &root, &name).await?;
            println!("{} Created {name}", style("✓").green());
        }
    }

    Ok(())
}

fn emit_url(url: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "url": url })),
        OutputFormat::Text => println!("{url}"),
    }
}

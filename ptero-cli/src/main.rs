//! Pterodactyl CLI - command-line access to a panel's client API.
//!
//! Thin front-end over `ptero-api`: every subcommand maps onto one manager
//! call, and failures are reported by error kind.

mod commands;

use clap::{Parser, Subcommand};
use console::style;
use tracing::{info, warn};

use ptero_api::ErrorManager;
use ptero_core::config::AppConfig;
use ptero_core::error::{PteroError, PteroResult};
use ptero_core::logging;

/// ptero - manage Pterodactyl servers from the terminal.
#[derive(Parser)]
#[command(
    name = "ptero",
    version,
    about = "Pterodactyl panel client CLI",
    long_about = "A command-line interface for the Pterodactyl panel client API.\n\
                  Credentials come from --base-url/--api-key, the PTERODACTYL_* \
                  environment variables, or the config file, in that order."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Panel base URL (overrides env and config).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Client API key (overrides env and config).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify credentials against the panel and save them to the config file.
    Login,
    /// List and control servers.
    Servers {
        #[command(subcommand)]
        action: commands::servers::ServersAction,
    },
    /// Browse and edit server files.
    Files {
        #[command(subcommand)]
        action: commands::files::FilesAction,
    },
    /// Manage server backups.
    Backups {
        #[command(subcommand)]
        action: commands::backups::BackupsAction,
    },
    /// Account details and API keys.
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        report_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> PteroResult<()> {
    // Load configuration
    let config_path = match cli.config.as_deref() {
        Some(path) => std::path::PathBuf::from(path),
        None => AppConfig::default_config_path()?,
    };
    let mut config = AppConfig::load_or_default(&config_path)?;
    config.apply_env();
    if let Some(url) = cli.base_url {
        config.panel.auth.base_url = url;
    }
    if let Some(key) = cli.api_key {
        config.panel.auth.api_key = key;
    }

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    let _guard = init_logging(&config, log_level);

    info!("ptero CLI v{}", ptero_core::constants::APP_VERSION);

    // Dispatch to command handlers
    match cli.command {
        Commands::Login => commands::login::run(&config, &config_path, cli.format).await,
        Commands::Servers { action } => commands::servers::run(&config, action, cli.format).await,
        Commands::Files { action } => commands::files::run(&config, action, cli.format).await,
        Commands::Backups { action } => commands::backups::run(&config, action, cli.format).await,
        Commands::Account { action } => commands::account::run(&config, action, cli.format).await,
    }
}

/// File plus console logging, or console only when the log directory is unusable.
fn init_logging(config: &AppConfig, level: &str) -> Option<logging::LogGuard> {
    let file_logging = config
        .effective_log_dir()
        .and_then(|dir| logging::init_logging(level, &dir, config.logging.json_output));
    match file_logging {
        Ok(guard) => Some(guard),
        Err(e) => {
            logging::init_console_logging(level);
            warn!("file logging unavailable, using console only: {e}");
            None
        }
    }
}

/// Print a failure, branching on its kind.
fn report_error(err: &PteroError) {
    let errors = ErrorManager::new();

    if errors.is_validation_error(err) {
        eprintln!("{} {err}", style("Invalid input:").yellow().bold());
    } else if errors.is_pterodactyl_error(err) {
        if let Some(panel) = err.as_pterodactyl() {
            for e in panel.all() {
                eprintln!(
                    "{} [{}] {}: {}",
                    style("Panel error").red().bold(),
                    e.status,
                    e.code,
                    e.detail
                );
            }
        } else {
            eprintln!("{} {err}", style("Panel error").red().bold());
        }
    } else if matches!(err, PteroError::MissingCredentials) {
        eprintln!("{} {err}", style("Error:").red().bold());
        eprintln!(
            "  Pass --base-url and --api-key, set {} and {}, or run `ptero login`.",
            ptero_core::constants::ENV_BASE_URL,
            ptero_core::constants::ENV_API_KEY
        );
    } else {
        eprintln!("{} {err}", style("Error:").red().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unusable_log_dir_falls_back_to_console() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut config = AppConfig::default();
        config.logging.directory = file.path().join("logs").display().to_string();
        assert!(init_logging(&config, "info").is_none());
    }
}

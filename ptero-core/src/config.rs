//! Credentials and client configuration.
//!
//! `AuthDetails` is the only thing the client needs to start. `AppConfig`
//! wraps it with transport and logging settings and is persisted as TOML.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{PteroError, PteroResult};

/// Panel URL and client API key.
///
/// Accepts `baseURL` and `hostURL` as aliases for `base_url`, and `apiKey`
/// for `api_key`, when deserialized.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthDetails {
    /// Panel base URL (e.g. "https://panel.example.com"). Used as given.
    #[serde(default, alias = "baseURL", alias = "hostURL", alias = "host_url")]
    pub base_url: String,

    /// Client API key (`ptlc_...`).
    #[serde(default, alias = "apiKey")]
    pub api_key: String,
}

impl AuthDetails {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Read credentials from `PTERODACTYL_BASE_URL` / `PTERODACTYL_API_KEY`.
    /// Unset variables yield empty fields, which fail validation.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(constants::ENV_BASE_URL).unwrap_or_default(),
            api_key: std::env::var(constants::ENV_API_KEY).unwrap_or_default(),
        }
    }

    /// Both fields are non-empty after trimming.
    pub fn is_valid(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    pub fn validate(&self) -> PteroResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(PteroError::MissingCredentials)
        }
    }
}

// The API key never reaches logs.
impl fmt::Debug for AuthDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthDetails")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Panel connection settings.
    #[serde(default)]
    pub panel: PanelConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Panel connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Credentials.
    #[serde(flatten)]
    pub auth: AuthDetails,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Whether to accept self-signed TLS certificates from the panel.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses the default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output for the file layer.
    #[serde(default)]
    pub json_output: bool,
}

fn default_timeout() -> u64 {
    constants::DEFAULT_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            auth: AuthDetails::default(),
            timeout_ms: default_timeout(),
            accept_invalid_certs: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> PteroResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> PteroResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> PteroResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| PteroError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Overlay credentials from the environment. Only set variables win.
    pub fn apply_env(&mut self) {
        let env = AuthDetails::from_env();
        if !env.base_url.trim().is_empty() {
            self.panel.auth.base_url = env.base_url;
        }
        if !env.api_key.trim().is_empty() {
            self.panel.auth.api_key = env.api_key;
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PteroResult<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| PteroError::Config("could not determine config directory".into()))?;
        Ok(dir.join(constants::APP_NAME).join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> PteroResult<PathBuf> {
        if self.logging.directory.is_empty() {
            let dir = dirs::data_local_dir().ok_or_else(|| {
                PteroError::Config("could not determine data directory".into())
            })?;
            Ok(dir.join(constants::APP_NAME).join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Check whether the panel connection is configured.
    pub fn is_panel_configured(&self) -> bool {
        self.panel.auth.is_valid()
    }
}

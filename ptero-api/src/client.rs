//! Client bootstrap.
//!
//! `PteroClient` turns raw credentials into five ready-to-use surfaces. The
//! only failure is synchronous: blank credentials are rejected before any
//! transport exists, and nothing touches the network during construction.

use std::sync::Arc;

use tracing::debug;

use ptero_core::classify::Classify;
use ptero_core::config::{AppConfig, AuthDetails};
use ptero_core::error::PteroResult;

use crate::managers::account::AccountManager;
use crate::managers::backups::BackupManager;
use crate::managers::errors::ErrorManager;
use crate::managers::files::FileManager;
use crate::managers::servers::ServerManager;
use crate::transport::{HttpTransport, TransportOptions};

/// Entry point of the library.
#[derive(Debug, Clone)]
pub struct PteroClient {
    auth: AuthDetails,
    http: Arc<HttpTransport>,
    files: FileManager,
    backups: BackupManager,
    servers: ServerManager,
    account: AccountManager,
    errors: ErrorManager,
}

impl PteroClient {
    /// Build a client with default transport options.
    pub fn new(auth: AuthDetails) -> PteroResult<Self> {
        Self::with_options(auth, TransportOptions::default())
    }

    /// Build a client with explicit transport options.
    pub fn with_options(auth: AuthDetails, options: TransportOptions) -> PteroResult<Self> {
        auth.validate()?;

        let http = Arc::new(HttpTransport::new(&auth, &options)?);
        debug!("pterodactyl client ready for {}", auth.base_url);

        Ok(Self {
            files: FileManager::new(Arc::clone(&http)),
            backups: BackupManager::new(Arc::clone(&http)),
            servers: ServerManager::new(Arc::clone(&http)),
            account: AccountManager::new(Arc::clone(&http)),
            errors: ErrorManager::new(),
            http,
            auth,
        })
    }

    /// Build a client from `PTERODACTYL_BASE_URL` / `PTERODACTYL_API_KEY`.
    pub fn from_env() -> PteroResult<Self> {
        Self::new(AuthDetails::from_env())
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &AppConfig) -> PteroResult<Self> {
        Self::with_options(
            config.panel.auth.clone(),
            TransportOptions::from(&config.panel),
        )
    }

    pub fn files(&self) -> &FileManager {
        &self.files
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    pub fn servers(&self) -> &ServerManager {
        &self.servers
    }

    pub fn account(&self) -> &AccountManager {
        &self.account
    }

    pub fn errors(&self) -> &ErrorManager {
        &self.errors
    }

    /// The shared transport.
    pub fn transport(&self) -> &HttpTransport {
        &self.http
    }

    /// Credentials the client was built with.
    pub fn auth_details(&self) -> &AuthDetails {
        &self.auth
    }

    /// See [`ErrorManager::is_pterodactyl_error`].
    pub fn is_pterodactyl_error<V: Classify + ?Sized>(&self, value: &V) -> bool {
        self.errors.is_pterodactyl_error(value)
    }

    /// See [`ErrorManager::is_validation_error`].
    pub fn is_validation_error<V: Classify + ?Sized>(&self, value: &V) -> bool {
        self.errors.is_validation_error(value)
    }
}

//! Pterodactyl API - typed client for the panel's client REST API.
//!
//! `PteroClient` validates credentials, builds one shared HTTP transport with
//! the bearer and JSON headers, and exposes the files, backups, servers,
//! account and errors managers on top of it.
//!
//! ```no_run
//! use ptero_api::PteroClient;
//! use ptero_core::AuthDetails;
//!
//! # async fn run() -> ptero_core::PteroResult<()> {
//! let client = PteroClient::new(AuthDetails::new("https://panel.example.com", "ptlc_..."))?;
//! match client.servers().get("1a7ce997").await {
//!     Ok(server) => println!("{}", server.name),
//!     Err(e) if client.is_validation_error(&e) => eprintln!("bad input: {e}"),
//!     Err(e) if client.is_pterodactyl_error(&e) => eprintln!("panel said: {e}"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod managers;
pub mod response;
pub mod transport;

// Re-export key types
pub use client::PteroClient;
pub use managers::account::AccountManager;
pub use managers::backups::{BackupManager, CreateBackupOptions};
pub use managers::errors::ErrorManager;
pub use managers::files::FileManager;
pub use managers::servers::{PowerSignal, ServerManager};
pub use response::{ListResponse, Pagination, Resource};
pub use transport::{HttpTransport, TransportOptions};

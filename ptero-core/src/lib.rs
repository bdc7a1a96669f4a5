//! Pterodactyl client core - errors, classification, credentials, configuration, logging.
//!
//! Shared foundation for the API and CLI crates:
//! - `PteroError` and its `ErrorKind` discriminant
//! - the `Classify` trait behind the error predicates
//! - `AuthDetails` and TOML-backed `AppConfig`
//! - tracing-based logging setup

pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use classify::Classify;
pub use config::{AppConfig, AuthDetails};
pub use error::{ErrorKind, PteroError, PteroResult, PterodactylError, ValidationError};
pub use logging::init_logging;

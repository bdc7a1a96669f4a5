//! Client-wide constants.

/// Client name, used for the config directory and log file prefix.
pub const APP_NAME: &str = "pteroclient";

/// Client version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Failure message when the base URL or API key is blank.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Missing/invalid base URL and/or API key!";

/// Path prefix of the panel's client API.
pub const CLIENT_API_PREFIX: &str = "/api/client";

/// Media type sent and accepted on every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Environment variable holding the panel base URL.
pub const ENV_BASE_URL: &str = "PTERODACTYL_BASE_URL";

/// Environment variable holding the client API key.
pub const ENV_API_KEY: &str = "PTERODACTYL_API_KEY";

/// Power signals accepted by `/servers/{id}/power`.
pub mod power_signals {
    pub const START: &str = "start";
    pub const STOP: &str = "stop";
    pub const RESTART: &str = "restart";
    pub const KILL: &str = "kill";

    /// All valid signals.
    pub const ALL: &[&str] = &[START, STOP, RESTART, KILL];
}

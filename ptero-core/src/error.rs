//! Error types for the Pterodactyl client.
//!
//! Everything a caller can receive from the client is folded into
//! `PteroError`. Each variant maps onto an `ErrorKind` discriminant, which is
//! what the classifier predicates match on.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MISSING_CREDENTIALS_MESSAGE;

/// Convenience type alias for Results using PteroError.
pub type PteroResult<T> = Result<T, PteroError>;

/// Discriminant shared by every error the client produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Invalid or missing credentials / configuration.
    Configuration,
    /// The panel rejected the request.
    Pterodactyl,
    /// The request was never valid to send.
    Validation,
    /// Anything else (transport failures, decode errors, foreign errors).
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Pterodactyl => "pterodactyl",
            Self::Validation => "validation",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A server-reported API failure.
///
/// Mirrors one entry of the panel's error envelope:
/// ```json
/// { "errors": [ { "code": "NotFoundHttpException", "status": "404", "detail": "..." } ] }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{code} ({status}): {detail}")]
pub struct PterodactylError {
    /// Panel error code (usually the exception class name).
    #[serde(default)]
    pub code: String,
    /// HTTP status as reported by the panel, as a string.
    #[serde(default)]
    pub status: String,
    /// Human-readable description.
    #[serde(default)]
    pub detail: String,
    /// Extra context (validation rule, source field) when the panel sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    /// Remaining entries when the envelope carried more than one error.
    #[serde(skip)]
    pub related: Vec<PterodactylError>,
}

impl PterodactylError {
    /// Build an error from its three reported fields.
    pub fn new(
        code: impl Into<String>,
        status: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            status: status.into(),
            detail: detail.into(),
            meta: None,
            related: Vec::new(),
        }
    }

    /// The reported status parsed as an HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status.trim().parse().ok()
    }

    /// All errors carried by the response, primary first.
    pub fn all(&self) -> impl Iterator<Item = &PterodactylError> {
        std::iter::once(self).chain(self.related.iter())
    }
}

/// The panel's error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    /// Reported errors, in panel order.
    #[serde(default)]
    pub errors: Vec<PterodactylError>,
}

impl ErrorEnvelope {
    /// Collapse the envelope into its primary error, keeping the rest as
    /// `related`. Returns `None` for an empty envelope.
    pub fn into_error(self) -> Option<PterodactylError> {
        let mut errors = self.errors.into_iter();
        let mut primary = errors.next()?;
        primary.related = errors.collect();
        Some(primary)
    }
}

/// A client-side input validation failure.
///
/// Raised before any request is sent. Both fields are optional so the error
/// can be default-constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    /// The offending input, if known.
    pub field: Option<String>,
    /// What was wrong with it.
    pub message: Option<String>,
}

impl ValidationError {
    /// Validation failure with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: Some(message.into()),
        }
    }

    /// Validation failure tied to a named input.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: Some(message.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.field, &self.message) {
            (Some(field), Some(message)) => write!(f, "invalid {field}: {message}"),
            (Some(field), None) => write!(f, "invalid {field}"),
            (None, Some(message)) => write!(f, "validation failed: {message}"),
            (None, None) => f.write_str("validation failed"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Unified error type for the Pterodactyl client.
#[derive(Error, Debug)]
pub enum PteroError {
    // -- Configuration errors --
    /// Base URL or API key is blank.
    #[error("{}", MISSING_CREDENTIALS_MESSAGE)]
    MissingCredentials,

    /// Failed to load, parse or apply configuration.
    #[error("configuration error: {0}")]
    Config(String),

    // -- API errors --
    /// The panel returned an error response.
    #[error(transparent)]
    Pterodactyl(#[from] PterodactylError),

    /// Input was rejected before sending.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // -- Network errors --
    /// HTTP request failed.
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    // -- Data errors --
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PteroError {
    /// The discriminant for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredentials | Self::Config(_) => ErrorKind::Configuration,
            Self::Pterodactyl(_) => ErrorKind::Pterodactyl,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Other(inner) => crate::classify::Classify::error_kind(inner),
            Self::Http(_) | Self::Timeout(_) | Self::Serialization(_) | Self::Io(_) => {
                ErrorKind::Unknown
            }
        }
    }

    /// The panel error, if this is one.
    pub fn as_pterodactyl(&self) -> Option<&PterodactylError> {
        match self {
            Self::Pterodactyl(e) => Some(e),
            _ => None,
        }
    }

    /// The validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PteroError {
    fn from(e: serde_json::Error) -> Self {
        PteroError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for PteroError {
    fn from(e: toml::de::Error) -> Self {
        PteroError::Config(e.to_string())
    }
}

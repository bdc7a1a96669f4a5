//! Resource managers, one per area of the client API.
//!
//! Each HTTP manager takes the shared transport as its only constructor
//! argument and maps every method onto exactly one request.

pub mod account;
pub mod backups;
pub mod errors;
pub mod files;
pub mod servers;

use ptero_core::constants::CLIENT_API_PREFIX;
use ptero_core::error::{PteroResult, ValidationError};

/// Reject blank input before anything is sent.
pub(crate) fn require(field: &str, value: &str) -> PteroResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::field(field, "must not be blank").into());
    }
    Ok(())
}

/// Validate an identifier that lands in a single path segment.
///
/// Dot segments and URL delimiters would change which endpoint is hit once
/// the path is parsed, so they are rejected outright.
pub(crate) fn path_segment<'a>(field: &str, value: &'a str) -> PteroResult<&'a str> {
    require(field, value)?;
    let value = value.trim();
    if value == "." || value == ".." {
        return Err(ValidationError::field(field, "must not be a dot segment").into());
    }
    let forbidden = |c: &char| {
        matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
    };
    if let Some(c) = value.chars().find(forbidden) {
        return Err(ValidationError::field(field, format!("must not contain {c:?}")).into());
    }
    Ok(value)
}

/// `/api/client/servers/{id}{rest}`, validating the identifier.
pub(crate) fn server_path(server: &str, rest: &str) -> PteroResult<String> {
    let server = path_segment("server", server)?;
    Ok(format!("{CLIENT_API_PREFIX}/servers/{server}{rest}"))
}

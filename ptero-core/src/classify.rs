//! Error classification by discriminant.
//!
//! `Classify` resolves any value a caller might hold after a failed call into
//! an `ErrorKind`. Dynamic errors (`dyn Error`, `anyhow::Error`) are first
//! resolved to the client's own error types; everything unrecognised, and the
//! absence of a value, is `ErrorKind::Unknown`. Classification never panics.

use std::error::Error as StdError;

use crate::error::{ErrorKind, PteroError, PterodactylError, ValidationError};

/// Anything that can be mapped onto an `ErrorKind`.
pub trait Classify {
    /// The discriminant for this value.
    fn error_kind(&self) -> ErrorKind;
}

impl Classify for ErrorKind {
    fn error_kind(&self) -> ErrorKind {
        *self
    }
}

impl Classify for PteroError {
    fn error_kind(&self) -> ErrorKind {
        self.kind()
    }
}

impl Classify for PterodactylError {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Pterodactyl
    }
}

impl Classify for ValidationError {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

impl Classify for std::io::Error {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Unknown
    }
}

impl Classify for std::fmt::Error {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Unknown
    }
}

impl Classify for anyhow::Error {
    fn error_kind(&self) -> ErrorKind {
        if let Some(e) = self.downcast_ref::<PteroError>() {
            return e.kind();
        }
        if self.is::<PterodactylError>() {
            return ErrorKind::Pterodactyl;
        }
        if self.is::<ValidationError>() {
            return ErrorKind::Validation;
        }
        ErrorKind::Unknown
    }
}

impl Classify for dyn StdError + 'static {
    fn error_kind(&self) -> ErrorKind {
        kind_of_dyn(self)
    }
}

impl Classify for dyn StdError + Send + Sync + 'static {
    fn error_kind(&self) -> ErrorKind {
        kind_of_dyn(self)
    }
}

// Non-error values classify as unknown.
impl Classify for str {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Unknown
    }
}

impl Classify for String {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Unknown
    }
}

impl Classify for () {
    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Unknown
    }
}

impl<T: Classify + ?Sized> Classify for &T {
    fn error_kind(&self) -> ErrorKind {
        (**self).error_kind()
    }
}

impl<T: Classify + ?Sized> Classify for Box<T> {
    fn error_kind(&self) -> ErrorKind {
        (**self).error_kind()
    }
}

impl<T: Classify + ?Sized> Classify for std::sync::Arc<T> {
    fn error_kind(&self) -> ErrorKind {
        (**self).error_kind()
    }
}

impl<T: Classify> Classify for Option<T> {
    fn error_kind(&self) -> ErrorKind {
        self.as_ref().map_or(ErrorKind::Unknown, Classify::error_kind)
    }
}

impl<T, E: Classify> Classify for Result<T, E> {
    fn error_kind(&self) -> ErrorKind {
        match self {
            Ok(_) => ErrorKind::Unknown,
            Err(e) => e.error_kind(),
        }
    }
}

fn kind_of_dyn(err: &(dyn StdError + 'static)) -> ErrorKind {
    if let Some(e) = err.downcast_ref::<PteroError>() {
        return e.kind();
    }
    if err.is::<PterodactylError>() {
        return ErrorKind::Pterodactyl;
    }
    if err.is::<ValidationError>() {
        return ErrorKind::Validation;
    }
    ErrorKind::Unknown
}

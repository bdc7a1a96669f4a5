//! Error classification surface.
//!
//! Lets callers tell "the panel rejected the request" apart from "the request
//! was never valid to send". Predicates match on the `ErrorKind` discriminant
//! and accept anything implementing `Classify`, including `Option::None`.

use ptero_core::classify::Classify;
use ptero_core::error::ErrorKind;

/// Stateless classifier. Holds no transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorManager;

impl ErrorManager {
    pub fn new() -> Self {
        Self
    }

    /// True iff `value` is a panel-reported error.
    pub fn is_pterodactyl_error<V: Classify + ?Sized>(&self, value: &V) -> bool {
        value.error_kind() == ErrorKind::Pterodactyl
    }

    /// True iff `value` is a client-side validation error.
    pub fn is_validation_error<V: Classify + ?Sized>(&self, value: &V) -> bool {
        value.error_kind() == ErrorKind::Validation
    }

    /// The discriminant for `value`.
    pub fn kind_of<V: Classify + ?Sized>(&self, value: &V) -> ErrorKind {
        value.error_kind()
    }
}

use storage::StoreError;
use thiserror::Error;

/// The three failure classes of the booking core. `InvalidArgument` is a
/// caller bug and never worth retrying; `NotFound` is a distinguishable
/// expected outcome so callers can branch without matching on message
/// strings; `Store` propagates a backing-file failure. Messages carry the
/// operation and the offending identifier, never credential material.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("invalid argument for {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation} found no match for '{identifier}'")]
    NotFound {
        operation: &'static str,
        identifier: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BookingError {
    #[must_use]
    pub fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn not_found(operation: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            operation,
            identifier: identifier.into(),
        }
    }
}

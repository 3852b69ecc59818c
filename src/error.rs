//! Error types for the transit registry
//!
//! Validation and lookup failures are returned to the caller. I/O failures
//! during whole-file persistence are logged by the database and never reach
//! this type through the public `to_json`/`from_json` calls.

use crate::domain::types::{PassengerId, TransportId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransitError>;

#[derive(Debug, Error)]
pub enum TransitError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("transport {id} is full ({capacity} passengers)")]
    CapacityExceeded { id: TransportId, capacity: u32 },

    #[error("transport {0} not found")]
    NotFound(TransportId),

    #[error("transport {0} already registered")]
    DuplicateId(TransportId),

    #[error("passenger {passenger} appears more than once in transport {transport}")]
    DuplicatePassenger { transport: TransportId, passenger: PassengerId },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransitError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        TransitError::Validation { field, reason: reason.into() }
    }
}

/// Reject empty or whitespace-only strings
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TransitError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Reject zero for fields that must be strictly positive
pub(crate) fn require_positive(field: &'static str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(TransitError::validation(field, "must be greater than zero"));
    }
    Ok(())
}

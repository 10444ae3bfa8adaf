use thiserror::Error;

use crate::store::StoreError;

/// A single validation failure with field path and message.
///
/// The field path names the offending input field, indexed for line items
/// (e.g. "details[2].quantity").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by invoice operations.
///
/// Validation failures are terminal for the request; storage failures
/// propagate unchanged. No retries, no recovery, no wrapping beyond `#[from]`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BillbookError {
    /// A business rule failed. The first failure wins; later rules are not
    /// evaluated.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The persistence collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

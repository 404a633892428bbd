//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// missing items, invariants). Persistence faults belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty item name, negative quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The named item has no entry in the store.
    #[error("Item '{0}' not found in inventory")]
    NotFound(String),

    /// A domain invariant would be violated (e.g. quantity overflow).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn not_found(item: impl Into<String>) -> Self {
        Self::NotFound(item.into())
    }

    /// `true` for rejected input, as opposed to missing data or broken invariants.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

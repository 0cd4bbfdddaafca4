//! Cross-cutting error types for Space Voyagers.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `ConfigError`) are defined in
//! their respective crates. The HTTP layer in `voyager-server` is where they
//! converge into status codes.

use thiserror::Error;

/// Rejection reasons from the entity validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name or description empty, or distance/radius not positive.
    #[error("invalid exoplanet data")]
    InvalidData,

    /// A terrestrial planet was given a non-positive mass.
    #[error("mass required for terrestrial exoplanets")]
    MissingMass,
}

/// Errors that can be raised by any Space Voyagers crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The entity failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An argument to a computation was out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A textual exoplanet type tag did not match any known type.
    #[error("unknown exoplanet type: {0}")]
    UnknownType(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Whether this error is the caller's fault (bad input) rather than ours.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidInput(_) | Self::UnknownType(_)
        )
    }
}

//! Error types for ionschema
//!
//! Schema-authoring problems and reader failures are reported through
//! [`Error`]. Values that fail a constraint are not errors; they are
//! reported as [`Violation`](crate::constraints::Violation)s.

use thiserror::Error;

/// Result type alias using ionschema Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ionschema operations
#[derive(Error, Debug)]
pub enum Error {
    /// The constraint declaration is malformed
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// Ion data could not be read
    #[error("Ion error: {0}")]
    Ion(#[from] ion_rs::IonError),

    /// The automaton graph was built incorrectly
    #[error("automaton error: {0}")]
    Automaton(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

impl Error {
    /// Shorthand for an [`Error::InvalidSchema`]
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema(message.into())
    }

    /// Check if this is a schema-authoring error
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self, Error::InvalidSchema(_))
    }
}

//! Error types for inventory operations.
//!
//! An empty filter result is not an error; only lookups, writes, parsing and
//! configuration can fail.

use crate::draft::ValidationFailure;

/// Error types for inventory operations.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// No record with this identifier
    #[error("Use case not found: {0}")]
    NotFound(String),

    /// A draft failed validation at the write boundary
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationFailure),

    /// Two records share an identifier
    #[error("Duplicate use case id: {0}")]
    DuplicateId(String),

    /// A record was updated before it was created
    #[error("Use case {0} has updatedAt earlier than createdAt")]
    InvalidTimestamps(String),

    /// Department name outside the known set
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// Stage name outside Idea/Pilot/Production
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    /// Sign-in attempted with a blank email or password
    #[error("Please enter both email and password")]
    MissingCredentials,

    /// A catalog document could not be read or parsed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InventoryError {
    /// Whether the presentation layer should render this as a "not found" state.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;

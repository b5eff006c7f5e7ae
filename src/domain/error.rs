//! Error types for domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The user display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The category name is empty after trimming.
    #[error("category name must not be empty")]
    EmptyCategoryName,

    /// The email address is not in a recognisable `local@domain` shape.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The due-date day offset does not map to a representable timestamp.
    #[error("due date offset of {0} days is out of range")]
    DueDateOutOfRange(i64),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseStatusError(pub String);

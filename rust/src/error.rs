//! Error types shared by the generator and the ID inspection routines.

use thiserror::Error;

/// Structural problems found by [`validate`](crate::validate).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid character: only digits and one '.' separator are supported")]
    InvalidCharacter,
    #[error("Invalid format: found more than one '.' separator")]
    TooManySeparators,
}

/// Errors that can occur during unixid operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnixIdError {
    #[error("Missing required configuration: {0}")]
    Configuration(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid timestamp format: {0}")]
    Format(String),
    #[error("Clock adapter is not set")]
    ClockUnset,
}

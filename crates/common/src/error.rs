//! Common error types.

use thiserror::Error;

/// Main error type for grid layout computation.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Region out of bounds: {0}")]
    OutOfBounds(String),

    #[error("Reserved space out of bounds: {0}")]
    ReservedOutOfBounds(String),

    #[error("Cell conflict: {0}")]
    Conflict(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GridResult<T> = Result<T, GridError>;

impl GridError {
    pub fn invalid_option(msg: impl Into<String>) -> Self {
        Self::InvalidOption(msg.into())
    }

    pub fn invalid_item(msg: impl Into<String>) -> Self {
        Self::InvalidItem(msg.into())
    }

    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    pub fn reserved_out_of_bounds(msg: impl Into<String>) -> Self {
        Self::ReservedOutOfBounds(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Whether the error stems from caller input rather than an internal
    /// invariant violation.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidOption(_) | Self::InvalidItem(_) | Self::ReservedOutOfBounds(_) | Self::Parse(_)
        )
    }
}

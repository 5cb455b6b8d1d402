//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Row not found: {0}")]
    NotFound(String),

    #[error("Row already exists: {0}")]
    Conflict(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid row data: {0}")]
    Mapping(#[from] MappingError),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn conflict(what: impl Into<String>) -> Self {
        Self::Conflict(what.into())
    }

    pub fn foreign_key(what: impl Into<String>) -> Self {
        Self::ForeignKey(what.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// True if the error means the requested row does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Check if error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Backend(_))
    }
}

/// A persisted row that cannot be turned into a domain value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    #[error("{table} row has a blank {field}")]
    BlankField {
        table: &'static str,
        field: &'static str,
    },

    #[error("formation {formation_id} has invalid time {time}")]
    InvalidTime { formation_id: String, time: f64 },

    #[error("position {position_id} has non-finite coordinates ({x}, {y})")]
    InvalidCoordinate { position_id: String, x: f64, y: f64 },

    #[error("member {member_id} has invalid color '{color}'")]
    InvalidColor { member_id: String, color: String },

    #[error("member {member_id} has negative display order {order}")]
    InvalidOrder { member_id: String, order: i32 },

    #[error("video {video_id} has invalid YouTube id: {reason}")]
    InvalidYoutubeId { video_id: String, reason: String },
}

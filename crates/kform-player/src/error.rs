//! Player error types.

use thiserror::Error;

pub type PlayerResult<T> = Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Player API failed to load: {0}")]
    ApiLoad(String),

    #[error("Playback clock error: {0}")]
    Clock(String),

    #[error("No formation data for video {0}")]
    NoFormationData(String),

    #[error("Playback channel closed")]
    ChannelClosed,

    #[error("Store error: {0}")]
    Store(#[from] kform_store::StoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlayerError {
    pub fn api_load(msg: impl Into<String>) -> Self {
        Self::ApiLoad(msg.into())
    }

    pub fn clock(msg: impl Into<String>) -> Self {
        Self::Clock(msg.into())
    }

    /// Check if error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            PlayerError::ApiLoad(_) | PlayerError::Clock(_) => true,
            PlayerError::Store(e) => e.is_retryable(),
            _ => false,
        }
    }
}

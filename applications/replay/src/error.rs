/// Replay error types
use tempo_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReplayError>;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] tempo_core::CoreError),

    /// Only raised for contract violations such as a clock running backwards;
    /// ordinary playback failures become output messages
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Invalid command feed: {0}")]
    InvalidFeed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

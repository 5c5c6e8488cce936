//! Error types for playback sessions

use tempo_core::SourceKind;
use thiserror::Error;

/// Playback errors
///
/// Every variant leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// No source is currently loaded
    #[error("No source loaded")]
    NotLoaded,

    /// Operation does not apply to the loaded source kind
    #[error("{operation} is not supported for a loaded {actual}")]
    WrongSourceKind {
        operation: &'static str,
        actual: SourceKind,
    },

    /// Source has no playable items
    #[error("Source has no playable items")]
    EmptySource,

    /// Command clock moved backwards
    #[error("Timestamp {requested} is earlier than checkpoint {checkpoint}")]
    InvalidTimestamp { checkpoint: u64, requested: u64 },
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

//! Playback Events
//!
//! Sessions queue events as their state changes; callers drain them after
//! each command. Events are emitted when:
//! - A source is loaded or runs out
//! - The current item changes through navigation
//! - Play/pause, repeat or shuffle state changes
//! - An ad break is queued or finishes

use serde::{Deserialize, Serialize};

/// Events emitted by a playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// A source was loaded
    Loaded {
        /// Source name
        source: String,
        /// First item in play order
        item: String,
    },

    /// Navigation moved to a different item (or restarted the same one)
    ItemChanged {
        item: String,
        previous: Option<String>,
    },

    /// Source reached its end and was unloaded
    Finished {
        source: String,
    },

    /// Play/pause toggled
    StateChanged {
        playing: bool,
    },

    /// Repeat mode cycled
    RepeatChanged {
        /// Display name of the new mode
        mode: String,
    },

    /// Shuffle toggled
    ShuffleChanged {
        enabled: bool,
    },

    /// Ad break queued; it plays from the next time advance
    AdQueued {
        price: u64,
    },

    /// Ad break finished, normal playback resumes
    AdFinished,
}

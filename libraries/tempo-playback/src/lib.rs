//! Tempo Playback - Virtual-clock Playback Timing
//!
//! Tracks where in a media source each user's playback currently is,
//! without a real clock or audio device. Position is derived lazily from
//! command timestamps.
//!
//! This crate provides:
//! - Per-user playback sessions (load, play/pause, status)
//! - Time advancement with ad breaks and repeat-mode wrap-around
//! - Position resolution over shuffled or linear play orders
//! - Seeded, reproducible shuffle with position continuity
//! - Navigation (next, prev, podcast forward/backward)
//! - Playback events and a bounded listen history
//!
//! # Architecture
//!
//! `tempo-playback` has no I/O and no global state. The caller owns the
//! sessions and decides when to advance their clocks.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use tempo_core::{Collection, CollectionKind, Song};
//! use tempo_playback::{PlaybackConfig, PlaybackSession, Step};
//!
//! let album = Collection::new(
//!     "Debut",
//!     CollectionKind::Album,
//!     vec![Song::new("A", 100), Song::new("B", 150)],
//! );
//!
//! let mut session = PlaybackSession::new("alice", PlaybackConfig::default());
//! session.load(album.into(), 0).unwrap();
//!
//! // 130 seconds later the second track is 30 seconds in
//! session.advance_time(130).unwrap();
//! assert_eq!(session.status().name, "B");
//! assert_eq!(session.status().remained_time, 120);
//!
//! // Skipping past the last track of a non-repeating album unloads it
//! assert_eq!(session.next().unwrap(), Step::Ended);
//! assert!(!session.is_loaded());
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use tempo_core::{Collection, CollectionKind, Song};
//! use tempo_playback::{PlaybackSession, RepeatMode, PlaylistRepeat};
//!
//! let playlist = Collection::new(
//!     "Mix",
//!     CollectionKind::Playlist,
//!     vec![Song::new("A", 60), Song::new("B", 60), Song::new("C", 60)],
//! );
//!
//! let mut session = PlaybackSession::new("bob", Default::default());
//! session.load(playlist.into(), 0).unwrap();
//!
//! assert_eq!(
//!     session.cycle_repeat().unwrap(),
//!     RepeatMode::Playlist(PlaylistRepeat::RepeatAll)
//! );
//!
//! session.advance_time(70).unwrap();
//! session.toggle_shuffle(42).unwrap();
//!
//! // Still 10 seconds into "B", wherever it landed in the new order
//! let (item, elapsed) = session.current_item().unwrap();
//! assert_eq!((item.name, elapsed), ("B", 10));
//! ```

#![forbid(unsafe_code)]

mod advancer;
mod error;
pub mod events;
mod history;
mod navigation;
pub mod resolver;
mod session;
pub mod shuffle;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use history::ListenHistory;
pub use resolver::Resolved;
pub use session::PlaybackSession;
pub use shuffle::Permutation;
pub use types::{
    AdState, PlaybackConfig, PlaybackStatus, PlaylistRepeat, PodcastRepeat, RepeatFamily,
    RepeatMode, RepeatPolicy, ShuffleState, Step,
};

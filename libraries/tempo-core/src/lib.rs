//! Tempo Core
//!
//! Catalog domain types shared by the playback engine and the replay tool.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Episode`, `Podcast`, `Playlist`, `Album`, `User`
//! - **Media Sources**: `MediaSource`, the thing a playback session loads
//! - **Library**: the JSON-backed catalog used to resolve sources by name
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use tempo_core::{Library, SourceKind};
//!
//! let library = Library::from_json(r#"{
//!     "songs": [{"name": "Intro", "duration": 120}]
//! }"#).unwrap();
//!
//! let source = library.resolve(SourceKind::Song, "Intro").unwrap();
//! assert_eq!(source.total_duration(), 120);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod library;
pub mod types;

pub use error::{CoreError, Result};
pub use library::Library;
pub use types::{
    Album, Collection, CollectionKind, Episode, MediaItem, MediaSource, Playlist, Podcast, Song,
    SourceKind, User,
};

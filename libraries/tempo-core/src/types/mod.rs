mod collection;
mod media;
mod source;
mod user;

pub use collection::{Album, Playlist, Podcast};
pub use media::{Episode, Song};
pub use source::{Collection, CollectionKind, MediaItem, MediaSource, SourceKind};
pub use user::User;

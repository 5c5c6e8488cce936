/// Loadable media sources
use super::collection::Podcast;
use super::media::Song;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of catalog entity a source was loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Song,
    Playlist,
    Album,
    Podcast,
}

impl SourceKind {
    /// Lowercase name as used in command feeds
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Song => "song",
            SourceKind::Playlist => "playlist",
            SourceKind::Album => "album",
            SourceKind::Podcast => "podcast",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "song" => Ok(SourceKind::Song),
            "playlist" => Ok(SourceKind::Playlist),
            "album" => Ok(SourceKind::Album),
            "podcast" => Ok(SourceKind::Podcast),
            other => Err(CoreError::invalid_input(format!("unknown source type: {other}"))),
        }
    }
}

/// Origin of an ordered song collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Playlist,
    Album,
}

/// Resolved, ordered list of songs ready for playback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection name
    pub name: String,

    /// Playlist or album
    pub kind: CollectionKind,

    /// Songs in linear (unshuffled) order
    pub tracks: Vec<Song>,
}

impl Collection {
    pub fn new(name: impl Into<String>, kind: CollectionKind, tracks: Vec<Song>) -> Self {
        Self {
            name: name.into(),
            kind,
            tracks,
        }
    }
}

/// One playable member of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaItem<'a> {
    pub name: &'a str,
    pub duration: u64,
}

/// Anything that can be loaded into a playback session
///
/// A single track, an ordered collection of tracks (playlist/album) or the
/// episodes of a podcast. Total duration is always the sum of member
/// durations; a single track is a collection of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaSource {
    Track(Song),
    Collection(Collection),
    Podcast(Podcast),
}

impl MediaSource {
    /// Catalog kind this source originates from
    pub fn kind(&self) -> SourceKind {
        match self {
            MediaSource::Track(_) => SourceKind::Song,
            MediaSource::Collection(c) => match c.kind {
                CollectionKind::Playlist => SourceKind::Playlist,
                CollectionKind::Album => SourceKind::Album,
            },
            MediaSource::Podcast(_) => SourceKind::Podcast,
        }
    }

    /// Source name
    pub fn name(&self) -> &str {
        match self {
            MediaSource::Track(song) => &song.name,
            MediaSource::Collection(c) => &c.name,
            MediaSource::Podcast(p) => &p.name,
        }
    }

    /// Number of playable items
    pub fn len(&self) -> usize {
        match self {
            MediaSource::Track(_) => 1,
            MediaSource::Collection(c) => c.tracks.len(),
            MediaSource::Podcast(p) => p.episodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item at linear index `index`
    pub fn item(&self, index: usize) -> Option<MediaItem<'_>> {
        match self {
            MediaSource::Track(song) => (index == 0).then_some(MediaItem {
                name: &song.name,
                duration: song.duration,
            }),
            MediaSource::Collection(c) => c.tracks.get(index).map(|s| MediaItem {
                name: &s.name,
                duration: s.duration,
            }),
            MediaSource::Podcast(p) => p.episodes.get(index).map(|e| MediaItem {
                name: &e.name,
                duration: e.duration,
            }),
        }
    }

    /// Member durations in linear order
    pub fn durations(&self) -> Vec<u64> {
        (0..self.len())
            .filter_map(|i| self.item(i))
            .map(|item| item.duration)
            .collect()
    }

    /// Sum of member durations
    pub fn total_duration(&self) -> u64 {
        match self {
            MediaSource::Track(song) => song.duration,
            MediaSource::Collection(c) => c.tracks.iter().map(|s| s.duration).sum(),
            MediaSource::Podcast(p) => p.total_duration(),
        }
    }

    /// Whether this is a playlist or album
    pub fn is_collection(&self) -> bool {
        matches!(self, MediaSource::Collection(_))
    }

    pub fn is_podcast(&self) -> bool {
        matches!(self, MediaSource::Podcast(_))
    }
}

impl From<Song> for MediaSource {
    fn from(song: Song) -> Self {
        MediaSource::Track(song)
    }
}

impl From<Collection> for MediaSource {
    fn from(collection: Collection) -> Self {
        MediaSource::Collection(collection)
    }
}

impl From<Podcast> for MediaSource {
    fn from(podcast: Podcast) -> Self {
        MediaSource::Podcast(podcast)
    }
}

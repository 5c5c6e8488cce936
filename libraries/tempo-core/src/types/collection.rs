/// Catalog collections: playlists, albums, podcasts
use super::media::Episode;
use serde::{Deserialize, Serialize};

/// User playlist
///
/// Songs are referenced by name and resolved against the library when loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Playlist name
    pub name: String,

    /// Owner username
    pub owner: String,

    /// Song names in playlist order
    #[serde(default)]
    pub songs: Vec<String>,
}

/// Artist album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// Album name
    pub name: String,

    /// Owning artist
    pub owner: String,

    /// Song names in track order
    #[serde(default)]
    pub songs: Vec<String>,
}

/// Podcast with its episodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    /// Podcast name
    pub name: String,

    /// Host username
    pub owner: String,

    /// Episodes in broadcast order
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl Podcast {
    /// Create a podcast from its episodes
    pub fn new(name: impl Into<String>, owner: impl Into<String>, episodes: Vec<Episode>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            episodes,
        }
    }

    /// Sum of all episode durations
    pub fn total_duration(&self) -> u64 {
        self.episodes.iter().map(|e| e.duration).sum()
    }
}

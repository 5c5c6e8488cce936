/// Playable item domain types
use serde::{Deserialize, Serialize};

/// A song in the catalog
///
/// Durations are whole simulation time units (seconds in the command feed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Song name, unique within the library
    pub name: String,

    /// Duration in time units
    pub duration: u64,

    /// Album name
    #[serde(default)]
    pub album: Option<String>,

    /// Artist name
    #[serde(default)]
    pub artist: Option<String>,

    /// Genre
    #[serde(default)]
    pub genre: Option<String>,

    /// Release year
    #[serde(default)]
    pub release_year: Option<u32>,
}

impl Song {
    /// Create a song with minimal metadata
    pub fn new(name: impl Into<String>, duration: u64) -> Self {
        Self {
            name: name.into(),
            duration,
            album: None,
            artist: None,
            genre: None,
            release_year: None,
        }
    }

    /// Builder-style artist setter
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }
}

/// A podcast episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Episode name
    pub name: String,

    /// Duration in time units
    pub duration: u64,

    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl Episode {
    /// Create an episode without a description
    pub fn new(name: impl Into<String>, duration: u64) -> Self {
        Self {
            name: name.into(),
            duration,
            description: String::new(),
        }
    }
}

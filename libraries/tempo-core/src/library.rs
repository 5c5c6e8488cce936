//! In-memory catalog loaded from a library JSON file

use crate::error::{CoreError, Result};
use crate::types::{
    Album, Collection, CollectionKind, MediaSource, Playlist, Podcast, Song, SourceKind, User,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Catalog of everything a command feed can reference
///
/// Lookups are by name; names are assumed unique per entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    #[serde(default)]
    pub songs: Vec<Song>,

    #[serde(default)]
    pub podcasts: Vec<Podcast>,

    #[serde(default)]
    pub playlists: Vec<Playlist>,

    #[serde(default)]
    pub albums: Vec<Album>,

    #[serde(default)]
    pub users: Vec<User>,
}

impl Library {
    /// Parse a library from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let library: Library = serde_json::from_str(json)?;
        library.validate()?;
        Ok(library)
    }

    /// Read and parse a library file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that every playlist and album only references known songs
    pub fn validate(&self) -> Result<()> {
        let named = self
            .playlists
            .iter()
            .map(|p| (&p.name, &p.songs))
            .chain(self.albums.iter().map(|a| (&a.name, &a.songs)));

        for (collection, songs) in named {
            if let Some(missing) = songs.iter().find(|s| self.song(s).is_none()) {
                return Err(CoreError::DanglingSong {
                    collection: collection.clone(),
                    song: missing.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn song(&self, name: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.name == name)
    }

    pub fn podcast(&self, name: &str) -> Option<&Podcast> {
        self.podcasts.iter().find(|p| p.name == name)
    }

    pub fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name == name)
    }

    pub fn album(&self, name: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.name == name)
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Build the playable source for a catalog entry
    ///
    /// Collections are resolved to owned song lists in their stored order.
    /// Empty playlists, albums and podcasts are rejected.
    pub fn resolve(&self, kind: SourceKind, name: &str) -> Result<MediaSource> {
        let source = match kind {
            SourceKind::Song => self
                .song(name)
                .cloned()
                .map(MediaSource::Track)
                .ok_or_else(|| CoreError::not_found("Song", name))?,
            SourceKind::Podcast => self
                .podcast(name)
                .cloned()
                .map(MediaSource::Podcast)
                .ok_or_else(|| CoreError::not_found("Podcast", name))?,
            SourceKind::Playlist => {
                let playlist = self
                    .playlist(name)
                    .ok_or_else(|| CoreError::not_found("Playlist", name))?;
                self.collect(&playlist.name, CollectionKind::Playlist, &playlist.songs)?
            }
            SourceKind::Album => {
                let album = self
                    .album(name)
                    .ok_or_else(|| CoreError::not_found("Album", name))?;
                self.collect(&album.name, CollectionKind::Album, &album.songs)?
            }
        };

        if source.is_empty() {
            return Err(CoreError::EmptyCollection(name.to_string()));
        }

        Ok(source)
    }

    fn collect(&self, name: &str, kind: CollectionKind, songs: &[String]) -> Result<MediaSource> {
        let tracks = songs
            .iter()
            .map(|song| {
                self.song(song)
                    .cloned()
                    .ok_or_else(|| CoreError::DanglingSong {
                        collection: name.to_string(),
                        song: song.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Collection::new(name, kind, tracks).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"{
        "songs": [
            {"name": "A", "duration": 100, "artist": "Band"},
            {"name": "B", "duration": 150, "artist": "Band"}
        ],
        "podcasts": [
            {"name": "Cast", "owner": "host", "episodes": [
                {"name": "E1", "duration": 60, "description": "first"}
            ]},
            {"name": "Silent", "owner": "host", "episodes": []}
        ],
        "playlists": [{"name": "Mix", "owner": "alice", "songs": ["B", "A"]}],
        "albums": [{"name": "Debut", "owner": "Band", "songs": ["A", "B"]}],
        "users": [{"username": "alice", "age": 30, "city": "Cluj"}]
    }"#;

    #[test]
    fn resolves_playlist_in_stored_order() {
        let library = Library::from_json(LIBRARY).unwrap();
        let source = library.resolve(SourceKind::Playlist, "Mix").unwrap();

        assert_eq!(source.kind(), SourceKind::Playlist);
        assert_eq!(source.item(0).map(|i| i.name), Some("B"));
        assert_eq!(source.total_duration(), 250);
    }

    #[test]
    fn resolves_song_and_album() {
        let library = Library::from_json(LIBRARY).unwrap();

        let song = library.resolve(SourceKind::Song, "A").unwrap();
        assert_eq!(song.total_duration(), 100);

        let album = library.resolve(SourceKind::Album, "Debut").unwrap();
        assert_eq!(album.len(), 2);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let library = Library::from_json(LIBRARY).unwrap();
        let err = library.resolve(SourceKind::Song, "Nope").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn empty_podcast_cannot_be_resolved() {
        let library = Library::from_json(LIBRARY).unwrap();
        let err = library.resolve(SourceKind::Podcast, "Silent").unwrap_err();
        assert!(matches!(err, CoreError::EmptyCollection(name) if name == "Silent"));
    }

    #[test]
    fn dangling_song_reference_fails_validation() {
        let json = r#"{"songs": [], "playlists": [{"name": "Bad", "owner": "x", "songs": ["Ghost"]}]}"#;
        let err = Library::from_json(json).unwrap_err();
        assert!(matches!(err, CoreError::DanglingSong { song, .. } if song == "Ghost"));
    }

    #[test]
    fn users_default_to_free_accounts() {
        let library = Library::from_json(LIBRARY).unwrap();
        let alice = library.user("alice").unwrap();
        assert!(!alice.premium);
        assert_eq!(alice.city, "Cluj");
    }
}

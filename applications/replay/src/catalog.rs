//! Catalog context
//!
//! Owns the library and one playback session per user. Passed explicitly
//! to the scheduler and dispatcher.

use std::collections::BTreeMap;
use tempo_core::{Library, MediaSource, SourceKind, User};
use tempo_playback::{PlaybackConfig, PlaybackSession};

#[derive(Debug)]
pub struct Catalog {
    library: Library,

    /// Keyed by username; iteration order is stable
    sessions: BTreeMap<String, PlaybackSession>,
}

impl Catalog {
    /// Create a catalog with an unloaded session for every library user
    pub fn new(library: Library, config: &PlaybackConfig) -> Self {
        let sessions = library
            .users
            .iter()
            .map(|user| {
                (
                    user.username.clone(),
                    PlaybackSession::new(&user.username, config.clone()),
                )
            })
            .collect::<BTreeMap<_, _>>();

        tracing::debug!(
            users = sessions.len(),
            songs = library.songs.len(),
            podcasts = library.podcasts.len(),
            "catalog ready"
        );

        Self { library, sessions }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.library.user(username)
    }

    pub fn session(&self, username: &str) -> Option<&PlaybackSession> {
        self.sessions.get(username)
    }

    pub fn session_mut(&mut self, username: &str) -> Option<&mut PlaybackSession> {
        self.sessions.get_mut(username)
    }

    /// All sessions in username order
    pub fn sessions_mut(&mut self) -> impl Iterator<Item = &mut PlaybackSession> {
        self.sessions.values_mut()
    }

    pub fn sessions(&self) -> impl Iterator<Item = &PlaybackSession> {
        self.sessions.values()
    }

    /// Build a playable source from the library
    pub fn resolve(&self, kind: SourceKind, name: &str) -> tempo_core::Result<MediaSource> {
        self.library.resolve(kind, name)
    }
}

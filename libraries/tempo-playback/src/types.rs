//! Core types for playback sessions

use serde::{Deserialize, Serialize};
use std::fmt;
use tempo_core::MediaSource;

/// Repeat modes available to songs, playlists and albums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaylistRepeat {
    /// Stop when the last item ends
    NoRepeat,

    /// Loop the whole source
    RepeatAll,

    /// Loop the current item
    RepeatCurrentSong,
}

/// Repeat modes available to podcasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PodcastRepeat {
    /// Stop when the last episode ends
    NoRepeat,

    /// Replay the current episode once more when skipped
    RepeatOnce,

    /// Loop the whole podcast
    RepeatInfinite,
}

/// Which repeat cycle a source uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatFamily {
    Playlist,
    Podcast,
}

impl RepeatFamily {
    /// Family for a loaded source; single tracks share the playlist cycle
    pub fn of(source: &MediaSource) -> Self {
        match source {
            MediaSource::Podcast(_) => RepeatFamily::Podcast,
            MediaSource::Track(_) | MediaSource::Collection(_) => RepeatFamily::Playlist,
        }
    }

    /// First mode of the cycle
    pub fn initial(self) -> RepeatMode {
        match self {
            RepeatFamily::Playlist => RepeatMode::Playlist(PlaylistRepeat::NoRepeat),
            RepeatFamily::Podcast => RepeatMode::Podcast(PodcastRepeat::NoRepeat),
        }
    }
}

/// How the clock behaves once it runs past the end of an item or source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatPolicy {
    /// Clamp at the end of the source and unload
    Stop,

    /// Wrap around to the start of the source
    Wrap,

    /// Wrap around inside the current item
    Item,
}

/// Repeat mode of a session
///
/// The family is fixed at load time; cycling never crosses families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepeatMode {
    Playlist(PlaylistRepeat),
    Podcast(PodcastRepeat),
}

impl RepeatMode {
    /// Next mode in this family's 3-cycle
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::Playlist(mode) => RepeatMode::Playlist(match mode {
                PlaylistRepeat::NoRepeat => PlaylistRepeat::RepeatAll,
                PlaylistRepeat::RepeatAll => PlaylistRepeat::RepeatCurrentSong,
                PlaylistRepeat::RepeatCurrentSong => PlaylistRepeat::NoRepeat,
            }),
            RepeatMode::Podcast(mode) => RepeatMode::Podcast(match mode {
                PodcastRepeat::NoRepeat => PodcastRepeat::RepeatOnce,
                PodcastRepeat::RepeatOnce => PodcastRepeat::RepeatInfinite,
                PodcastRepeat::RepeatInfinite => PodcastRepeat::NoRepeat,
            }),
        }
    }

    pub fn family(self) -> RepeatFamily {
        match self {
            RepeatMode::Playlist(_) => RepeatFamily::Playlist,
            RepeatMode::Podcast(_) => RepeatFamily::Podcast,
        }
    }

    /// Clock behaviour at item and source boundaries
    pub fn policy(self) -> RepeatPolicy {
        match self {
            RepeatMode::Playlist(PlaylistRepeat::NoRepeat)
            | RepeatMode::Podcast(PodcastRepeat::NoRepeat)
            | RepeatMode::Podcast(PodcastRepeat::RepeatOnce) => RepeatPolicy::Stop,
            RepeatMode::Playlist(PlaylistRepeat::RepeatAll)
            | RepeatMode::Podcast(PodcastRepeat::RepeatInfinite) => RepeatPolicy::Wrap,
            RepeatMode::Playlist(PlaylistRepeat::RepeatCurrentSong) => RepeatPolicy::Item,
        }
    }

    /// Whether the virtual position is taken modulo the source duration
    pub fn is_repeating(self) -> bool {
        self.policy() != RepeatPolicy::Stop
    }

    /// Display name, e.g. "Repeat All"
    pub fn name(self) -> &'static str {
        match self {
            RepeatMode::Playlist(PlaylistRepeat::NoRepeat)
            | RepeatMode::Podcast(PodcastRepeat::NoRepeat) => "No Repeat",
            RepeatMode::Playlist(PlaylistRepeat::RepeatAll) => "Repeat All",
            RepeatMode::Playlist(PlaylistRepeat::RepeatCurrentSong) => "Repeat Current Song",
            RepeatMode::Podcast(PodcastRepeat::RepeatOnce) => "Repeat Once",
            RepeatMode::Podcast(PodcastRepeat::RepeatInfinite) => "Repeat Infinite",
        }
    }
}

impl Default for RepeatMode {
    fn default() -> Self {
        RepeatFamily::Playlist.initial()
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shuffle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShuffleState {
    /// Linear order
    #[default]
    Off,

    /// Seeded permutation
    On { seed: u64 },
}

impl ShuffleState {
    pub fn is_on(self) -> bool {
        matches!(self, ShuffleState::On { .. })
    }
}

/// Ad break progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdState {
    #[default]
    None,

    /// Starts on the next time advance
    Queued,

    /// Ad is running; `consumed` seconds have elapsed
    Playing { consumed: u64 },
}

/// Outcome of a next/prev navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Playback continues with the named item
    Playing(String),

    /// Source ran out; session is unloaded or idle at its end
    Ended,
}

/// Snapshot reported by the status command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStatus {
    /// Current item name, empty when nothing is loaded
    pub name: String,

    /// Seconds left in the current item
    pub remained_time: u64,

    /// Repeat mode display name
    pub repeat: String,

    pub shuffle: bool,

    pub paused: bool,
}

impl PlaybackStatus {
    /// Status of a session with nothing loaded
    pub fn idle() -> Self {
        Self {
            name: String::new(),
            remained_time: 0,
            repeat: RepeatMode::default().name().to_string(),
            shuffle: false,
            paused: true,
        }
    }
}

/// Configuration for playback sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Length of an ad break in seconds (default: 10)
    pub ad_duration: u64,

    /// Podcast forward/backward jump in seconds (default: 90)
    pub seek_step: u64,

    /// Maximum listen history size (default: 100)
    pub listen_history_size: usize,

    /// Elapsed seconds after which prev restarts the item instead of
    /// stepping back (default: 1)
    pub restart_threshold: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            ad_duration: 10,
            seek_step: 90,
            listen_history_size: 100,
            restart_threshold: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.ad_duration, 10);
        assert_eq!(config.seek_step, 90);
        assert_eq!(config.listen_history_size, 100);
        assert_eq!(config.restart_threshold, 1);
    }

    #[test]
    fn playlist_family_cycles_back_to_start() {
        let start = RepeatFamily::Playlist.initial();
        let names: Vec<_> = std::iter::successors(Some(start), |m| Some(m.cycled()))
            .take(4)
            .map(RepeatMode::name)
            .collect();

        assert_eq!(
            names,
            ["No Repeat", "Repeat All", "Repeat Current Song", "No Repeat"]
        );
    }

    #[test]
    fn podcast_family_cycles_back_to_start() {
        let start = RepeatFamily::Podcast.initial();
        let mode = start.cycled();
        assert_eq!(mode.name(), "Repeat Once");
        assert_eq!(mode.cycled().name(), "Repeat Infinite");
        assert_eq!(mode.cycled().cycled(), start);
    }

    #[test]
    fn repeat_policies() {
        assert_eq!(RepeatFamily::Playlist.initial().policy(), RepeatPolicy::Stop);
        assert_eq!(
            RepeatMode::Podcast(PodcastRepeat::RepeatOnce).policy(),
            RepeatPolicy::Stop
        );
        assert_eq!(
            RepeatMode::Podcast(PodcastRepeat::RepeatInfinite).policy(),
            RepeatPolicy::Wrap
        );
        assert_eq!(
            RepeatMode::Playlist(PlaylistRepeat::RepeatCurrentSong).policy(),
            RepeatPolicy::Item
        );
    }

    #[test]
    fn status_serializes_camel_case() {
        let json = serde_json::to_value(PlaybackStatus::idle()).unwrap();
        assert_eq!(json["remainedTime"], 0);
        assert_eq!(json["repeat"], "No Repeat");
        assert_eq!(json["paused"], true);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: PlaybackConfig = serde_json::from_str(r#"{"seek_step": 30}"#).unwrap();
        assert_eq!(config.seek_step, 30);
        assert_eq!(config.ad_duration, 10);
    }
}

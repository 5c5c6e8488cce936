//! Playback session
//!
//! One session per user. Holds the loaded source and the virtual clock;
//! time only moves when [`PlaybackSession::advance_time`] is called with a
//! command timestamp.

use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::history::ListenHistory;
use crate::resolver::{self, Resolved};
use crate::shuffle::Permutation;
use crate::types::{
    AdState, PlaybackConfig, PlaybackStatus, RepeatFamily, RepeatMode, RepeatPolicy, ShuffleState,
};
use tempo_core::{MediaItem, MediaSource};

/// Virtual-clock playback state for a single user
///
/// Invariants:
/// - a source is loaded iff `source.is_some()`
/// - `order` is a permutation of the loaded source's item indices
/// - in non-repeating modes `position <= total_duration()`
/// - in repeating modes `position < total_duration()`
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    owner: String,
    config: PlaybackConfig,

    // Loaded source
    pub(crate) source: Option<MediaSource>,
    pub(crate) durations: Vec<u64>,
    pub(crate) total: u64,

    // Settings
    pub(crate) playing: bool,
    pub(crate) repeat: RepeatMode,
    pub(crate) shuffle: ShuffleState,
    pub(crate) order: Permutation,

    // Clock
    pub(crate) position: u64,
    pub(crate) checkpoint: u64,

    // Ads
    pub(crate) ad: AdState,
    ads_charged: Vec<u64>,

    listens: ListenHistory,
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackSession {
    /// Create an unloaded session for `owner`
    pub fn new(owner: impl Into<String>, config: PlaybackConfig) -> Self {
        Self {
            owner: owner.into(),
            listens: ListenHistory::new(config.listen_history_size),
            config,
            source: None,
            durations: Vec::new(),
            total: 0,
            playing: true,
            repeat: RepeatMode::default(),
            shuffle: ShuffleState::Off,
            order: Permutation::identity(0),
            position: 0,
            checkpoint: 0,
            ad: AdState::None,
            ads_charged: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    // ===== Loading =====

    /// Load a source, replacing whatever was playing
    ///
    /// Resets the clock to 0 at `timestamp`, resumes playback and restores
    /// the family's initial repeat mode with shuffle off.
    pub fn load(&mut self, source: MediaSource, timestamp: u64) -> Result<()> {
        if source.is_empty() {
            return Err(PlaybackError::EmptySource);
        }
        self.check_timestamp(timestamp)?;

        self.durations = source.durations();
        self.total = self.durations.iter().sum();
        self.order = Permutation::identity(source.len());
        self.repeat = RepeatFamily::of(&source).initial();
        self.shuffle = ShuffleState::Off;
        self.position = 0;
        self.checkpoint = timestamp;
        self.playing = true;
        self.ad = AdState::None;

        let source_name = source.name().to_string();
        self.source = Some(source);

        let first = self.current_name().unwrap_or_default();
        tracing::debug!(owner = %self.owner, source = %source_name, "source loaded");
        self.listens.push(first.clone());
        self.pending_events.push(PlaybackEvent::Loaded {
            source: source_name,
            item: first,
        });

        Ok(())
    }

    /// Drop the loaded source after it ran out
    pub(crate) fn finish(&mut self) {
        let Some(source) = self.source.take() else {
            return;
        };

        tracing::debug!(owner = %self.owner, source = %source.name(), "source finished");
        self.durations.clear();
        self.total = 0;
        self.order = Permutation::identity(0);
        self.shuffle = ShuffleState::Off;
        self.position = 0;
        self.playing = false;
        self.ad = AdState::None;
        self.pending_events.push(PlaybackEvent::Finished {
            source: source.name().to_string(),
        });
    }

    // ===== Playback Control =====

    /// Set play/pause state
    pub fn set_playing(&mut self, playing: bool) -> Result<()> {
        self.require_loaded()?;

        if self.playing != playing {
            self.playing = playing;
            self.pending_events.push(PlaybackEvent::StateChanged { playing });
        }
        Ok(())
    }

    /// Flip play/pause, returning the new playing flag
    pub fn toggle_play(&mut self) -> Result<bool> {
        let playing = !self.playing;
        self.set_playing(playing)?;
        Ok(playing)
    }

    /// Queue an ad break to play at the next time advance
    ///
    /// Only music sources carry ads.
    pub fn queue_ad(&mut self, price: u64) -> Result<()> {
        let source = self.require_loaded()?;
        if source.is_podcast() {
            return Err(PlaybackError::WrongSourceKind {
                operation: "ad break",
                actual: source.kind(),
            });
        }

        self.ads_charged.push(price);
        if self.ad == AdState::None {
            self.ad = AdState::Queued;
        }
        self.pending_events.push(PlaybackEvent::AdQueued { price });
        Ok(())
    }

    // ===== State Queries =====

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn shuffle(&self) -> ShuffleState {
        self.shuffle
    }

    /// Current play order over linear item indices
    pub fn order(&self) -> &Permutation {
        &self.order
    }

    /// Virtual position in seconds since the start of the play order
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Timestamp of the last time advance
    pub fn checkpoint(&self) -> u64 {
        self.checkpoint
    }

    pub fn ad_state(&self) -> AdState {
        self.ad
    }

    /// Prices of every ad break queued so far
    pub fn ads_charged(&self) -> &[u64] {
        &self.ads_charged
    }

    /// Items this session started playing, oldest first
    pub fn listens(&self) -> &ListenHistory {
        &self.listens
    }

    /// Total duration of the loaded source, 0 when unloaded
    pub fn total_duration(&self) -> u64 {
        self.total
    }

    /// Item the clock is in, with its offsets in the play order
    ///
    /// `None` when unloaded, or idle at the end of a non-repeating source.
    pub fn current(&self) -> Option<Resolved> {
        self.source.as_ref()?;
        if !self.repeat.is_repeating() && self.position >= self.total {
            return None;
        }
        resolver::resolve(&self.durations, self.order.as_slice(), self.position)
    }

    /// Current item and the seconds elapsed inside it
    pub fn current_item(&self) -> Option<(MediaItem<'_>, u64)> {
        let current = self.current()?;
        let item = self.source.as_ref()?.item(current.item_index)?;
        Some((item, current.elapsed))
    }

    pub fn current_name(&self) -> Option<String> {
        self.current_item().map(|(item, _)| item.name.to_string())
    }

    /// Duration of the items played before the current one in play order
    pub fn played_duration_before(&self) -> Option<u64> {
        self.current().map(|c| c.start)
    }

    /// Seconds left in the whole source
    pub fn remaining(&self) -> u64 {
        if self.source.is_none() || self.total == 0 {
            return 0;
        }
        if self.repeat.is_repeating() {
            self.total - self.position % self.total
        } else {
            self.total.saturating_sub(self.position)
        }
    }

    /// Seconds played of the whole source, `total - remaining`
    pub fn elapsed_in_source(&self) -> u64 {
        if self.source.is_none() || self.total == 0 {
            return 0;
        }
        if self.repeat.is_repeating() {
            self.position % self.total
        } else {
            self.position.min(self.total)
        }
    }

    /// Seconds left in the current item
    pub fn item_remaining(&self) -> u64 {
        self.current().map(|c| c.remaining()).unwrap_or(0)
    }

    /// Snapshot for display
    ///
    /// Pure; repeated calls without a time advance return the same value.
    pub fn status(&self) -> PlaybackStatus {
        if self.source.is_none() {
            return PlaybackStatus::idle();
        }

        PlaybackStatus {
            name: self.current_name().unwrap_or_default(),
            remained_time: self.item_remaining(),
            repeat: self.repeat.name().to_string(),
            shuffle: self.shuffle.is_on(),
            paused: !self.playing,
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub(crate) fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    /// Record that `item` started playing
    pub(crate) fn record_listen(&mut self, item: &str, previous: Option<String>) {
        self.listens.push(item);
        self.pending_events.push(PlaybackEvent::ItemChanged {
            item: item.to_string(),
            previous,
        });
    }

    // ===== Helpers =====

    pub(crate) fn require_loaded(&self) -> Result<&MediaSource> {
        self.source.as_ref().ok_or(PlaybackError::NotLoaded)
    }

    pub(crate) fn check_timestamp(&self, timestamp: u64) -> Result<()> {
        if timestamp < self.checkpoint {
            return Err(PlaybackError::InvalidTimestamp {
                checkpoint: self.checkpoint,
                requested: timestamp,
            });
        }
        Ok(())
    }

    pub(crate) fn policy(&self) -> RepeatPolicy {
        self.repeat.policy()
    }

    /// Name of the linear item at `item_index`
    pub(crate) fn item_name(&self, item_index: usize) -> Option<String> {
        self.source
            .as_ref()?
            .item(item_index)
            .map(|item| item.name.to_string())
    }
}

//! Navigation operations
//!
//! next/prev, podcast seeking, repeat cycling and shuffle toggling. Every
//! operation requires a loaded source and leaves the session untouched
//! when it fails.

use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::resolver::{self, Resolved};
use crate::session::PlaybackSession;
use crate::shuffle::{self, Permutation};
use crate::types::{PlaylistRepeat, PodcastRepeat, RepeatMode, ShuffleState, Step};
use tempo_core::{MediaSource, SourceKind};

impl PlaybackSession {
    /// Skip to the next item
    ///
    /// Behaviour depends on the source kind and repeat mode; see [`Step`]
    /// for the two possible outcomes. Any successful skip that keeps
    /// playing also resumes a paused session.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Step> {
        let is_track = matches!(self.require_loaded()?, MediaSource::Track(_));
        let previous = self.current_name();

        let Some(current) = self.current() else {
            return Ok(self.end_of_source());
        };
        let end = current.end();
        let at_last = end >= self.total;
        let mut reported = None;

        match self.repeat {
            RepeatMode::Playlist(PlaylistRepeat::NoRepeat) if is_track => {
                self.finish();
                return Ok(Step::Ended);
            }
            RepeatMode::Playlist(_) if is_track => {
                // Skipping past the end of a looping track restarts it
                self.position = (self.position + current.remaining() + 1) % self.total;
            }
            RepeatMode::Playlist(PlaylistRepeat::NoRepeat) => {
                if at_last {
                    self.finish();
                    return Ok(Step::Ended);
                }
                self.position = end;
            }
            RepeatMode::Playlist(PlaylistRepeat::RepeatAll)
            | RepeatMode::Podcast(PodcastRepeat::RepeatInfinite) => {
                self.position = if at_last { 0 } else { end };
            }
            RepeatMode::Playlist(PlaylistRepeat::RepeatCurrentSong) => {
                self.position = current.start;
            }
            RepeatMode::Podcast(PodcastRepeat::NoRepeat) => {
                if at_last {
                    self.position = self.total;
                    self.resume();
                    return Ok(Step::Ended);
                }
                self.position = end;
            }
            RepeatMode::Podcast(PodcastRepeat::RepeatOnce) => {
                reported = self.item_name(current.item_index);
                self.position = end;
            }
        }

        let name = reported
            .or_else(|| self.current_name())
            .ok_or(PlaybackError::EmptySource)?;
        self.resume();
        self.record_listen(&name, previous);
        Ok(Step::Playing(name))
    }

    /// Go back to the start of the current or previous item
    ///
    /// Restarts the current item once at least `restart_threshold` seconds
    /// have elapsed in it; otherwise steps to the previous item in play
    /// order. The first item always restarts.
    pub fn prev(&mut self) -> Result<Step> {
        self.require_loaded()?;
        let previous = self.current_name();
        let current = self.current_or_last().ok_or(PlaybackError::EmptySource)?;

        let target = if current.elapsed >= self.config().restart_threshold
            || current.order_index == 0
        {
            current.order_index
        } else {
            current.order_index - 1
        };

        let item_index = *self
            .order
            .as_slice()
            .get(target)
            .ok_or(PlaybackError::EmptySource)?;
        let name = self.item_name(item_index).ok_or(PlaybackError::EmptySource)?;

        self.position =
            resolver::played_duration_before(&self.durations, self.order.as_slice(), target);
        self.resume();
        self.record_listen(&name, previous);
        Ok(Step::Playing(name))
    }

    /// Jump `seek_step` seconds ahead inside the current episode
    ///
    /// Snaps to the end of the episode instead of crossing into the next.
    /// No-op when idle at the end of the podcast.
    pub fn forward(&mut self) -> Result<()> {
        self.require_podcast("forward")?;
        let Some(current) = self.current() else {
            return Ok(());
        };

        let step = self.config().seek_step;
        self.position = if current.remaining() > step {
            current.start + current.elapsed + step
        } else {
            current.end()
        };

        if self.repeat.is_repeating() {
            self.position %= self.total;
        }
        Ok(())
    }

    /// Jump `seek_step` seconds back inside the current episode
    ///
    /// Snaps to the start of the episode instead of crossing into the
    /// previous one.
    pub fn backward(&mut self) -> Result<()> {
        self.require_podcast("backward")?;
        let Some(current) = self.current_or_last() else {
            return Ok(());
        };

        let step = self.config().seek_step;
        self.position = if current.elapsed > step {
            current.start + current.elapsed - step
        } else {
            current.start
        };
        Ok(())
    }

    /// Move to the next repeat mode of the loaded source's family
    pub fn cycle_repeat(&mut self) -> Result<RepeatMode> {
        self.require_loaded()?;

        self.repeat = self.repeat.cycled();
        if self.repeat.is_repeating() && self.total > 0 {
            self.position %= self.total;
        }

        self.emit(PlaybackEvent::RepeatChanged {
            mode: self.repeat.name().to_string(),
        });
        Ok(self.repeat)
    }

    /// Turn shuffle on (with `seed`) or off, returning the new state
    ///
    /// The current item keeps playing at the same offset; only its place in
    /// the play order changes.
    pub fn toggle_shuffle(&mut self, seed: u64) -> Result<bool> {
        let source = self.require_loaded()?;
        if !source.is_collection() {
            return Err(PlaybackError::WrongSourceKind {
                operation: "shuffle",
                actual: source.kind(),
            });
        }

        let len = source.len();
        let (order, state) = if self.shuffle.is_on() {
            (Permutation::identity(len), ShuffleState::Off)
        } else {
            (Permutation::seeded(len, seed), ShuffleState::On { seed })
        };

        self.position = shuffle::reanchor(&self.durations, &self.order, &order, self.position)
            .ok_or(PlaybackError::EmptySource)?;
        self.order = order;
        self.shuffle = state;

        let enabled = state.is_on();
        self.emit(PlaybackEvent::ShuffleChanged { enabled });
        Ok(enabled)
    }

    // ===== Helpers =====

    /// Current item, or the last item with the clock at its end when idle
    /// at the end of a non-repeating source
    fn current_or_last(&self) -> Option<Resolved> {
        self.current().or_else(|| {
            let last = self.order.len().checked_sub(1)?;
            resolver::resolve_at_end(&self.durations, self.order.as_slice(), last)
        })
    }

    /// Next with nothing left to play
    fn end_of_source(&mut self) -> Step {
        if self.source.as_ref().is_some_and(MediaSource::is_podcast) {
            self.position = self.total;
            self.resume();
        } else {
            self.finish();
        }
        Step::Ended
    }

    fn require_podcast(&self, operation: &'static str) -> Result<()> {
        let kind = self.require_loaded()?.kind();
        if kind != SourceKind::Podcast {
            return Err(PlaybackError::WrongSourceKind {
                operation,
                actual: kind,
            });
        }
        Ok(())
    }

    fn resume(&mut self) {
        if !self.playing {
            self.playing = true;
            self.emit(PlaybackEvent::StateChanged { playing: true });
        }
    }
}

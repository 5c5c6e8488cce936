//! Time advancement
//!
//! Moves a session's virtual clock forward to a command timestamp. A queued
//! ad break consumes elapsed time first; whatever is left then moves the
//! position under the repeat rules.

use crate::error::Result;
use crate::events::PlaybackEvent;
use crate::session::PlaybackSession;
use crate::types::{AdState, RepeatPolicy};

impl PlaybackSession {
    /// Advance the clock to `timestamp`
    ///
    /// Paused and unloaded sessions only move their checkpoint. Fails with
    /// `InvalidTimestamp` (and changes nothing) if `timestamp` is earlier
    /// than the last checkpoint.
    pub fn advance_time(&mut self, timestamp: u64) -> Result<()> {
        self.check_timestamp(timestamp)?;

        let delta = timestamp - self.checkpoint;
        self.checkpoint = timestamp;

        if self.source.is_none() || !self.playing {
            return Ok(());
        }

        let delta = self.consume_ad(delta);
        self.advance_position(delta);
        Ok(())
    }

    /// Let a pending ad eat into `delta`, returning what is left
    fn consume_ad(&mut self, delta: u64) -> u64 {
        let consumed = match self.ad {
            AdState::None => return delta,
            AdState::Queued => 0,
            AdState::Playing { consumed } => consumed,
        };

        let left = self.config().ad_duration.saturating_sub(consumed);
        if delta < left {
            self.ad = AdState::Playing {
                consumed: consumed + delta,
            };
            return 0;
        }

        self.ad = AdState::None;
        self.emit(PlaybackEvent::AdFinished);
        delta - left
    }

    fn advance_position(&mut self, delta: u64) {
        if self.total == 0 {
            self.finish();
            return;
        }

        match self.policy() {
            RepeatPolicy::Stop => {
                self.position = (self.position + delta).min(self.total);
                if self.position == self.total {
                    self.finish();
                }
            }
            RepeatPolicy::Wrap => {
                self.position = (self.position + delta) % self.total;
            }
            RepeatPolicy::Item => match self.current() {
                Some(item) if item.duration > 0 => {
                    self.position = item.start + (item.elapsed + delta) % item.duration;
                }
                _ => self.finish(),
            },
        }
    }
}

//! Global clock tick
//!
//! Every session is advanced to the incoming command's timestamp before the
//! command runs, not just the addressed user's session.

use crate::catalog::Catalog;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct Scheduler {
    last_tick: Option<u64>,
    ticks: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every session in `catalog` to `timestamp`
    ///
    /// Fails on the first session whose clock would move backwards; that
    /// means the command feed is out of order.
    pub fn tick(&mut self, catalog: &mut Catalog, timestamp: u64) -> Result<()> {
        for session in catalog.sessions_mut() {
            session.advance_time(timestamp)?;

            for event in session.drain_events() {
                tracing::debug!(user = %session.owner(), ?event, "playback event");
            }
        }

        self.last_tick = Some(timestamp);
        self.ticks += 1;
        tracing::trace!(timestamp, "tick");
        Ok(())
    }

    /// Timestamp of the most recent tick
    pub fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReplayError;
    use tempo_core::{Library, SourceKind};
    use tempo_playback::{PlaybackConfig, PlaybackError};

    fn catalog() -> Catalog {
        let library = Library::from_json(
            r#"{
                "songs": [{"name": "A", "duration": 100}],
                "users": [{"username": "u1"}, {"username": "u2"}]
            }"#,
        )
        .unwrap();
        Catalog::new(library, &PlaybackConfig::default())
    }

    #[test]
    fn tick_advances_idle_users_too() {
        let mut catalog = catalog();
        let source = catalog.resolve(SourceKind::Song, "A").unwrap();
        catalog.session_mut("u1").unwrap().load(source, 0).unwrap();

        let mut scheduler = Scheduler::new();
        scheduler.tick(&mut catalog, 40).unwrap();

        assert_eq!(catalog.session("u1").unwrap().position(), 40);
        assert_eq!(catalog.session("u2").unwrap().checkpoint(), 40);
        assert_eq!(scheduler.last_tick(), Some(40));
        assert_eq!(scheduler.ticks(), 1);
    }

    #[test]
    fn backwards_tick_is_fatal() {
        let mut catalog = catalog();
        let mut scheduler = Scheduler::new();
        scheduler.tick(&mut catalog, 50).unwrap();

        let err = scheduler.tick(&mut catalog, 20).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Playback(PlaybackError::InvalidTimestamp { .. })
        ));
    }
}

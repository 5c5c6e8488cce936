//! Command dispatcher
//!
//! Ticks every session to the command's timestamp, routes the command to
//! the addressed user's session and turns playback failures into the
//! messages listeners see.

use crate::catalog::Catalog;
use crate::command::{Command, CommandKind};
use crate::error::{ReplayError, Result};
use crate::output::CommandOutput;
use crate::scheduler::Scheduler;
use tempo_core::{CoreError, SourceKind};
use tempo_playback::{PlaybackError, PlaybackSession, Step};

mod messages {
    pub const LOADED: &str = "Playback loaded successfully.";
    pub const LOAD_EMPTY: &str = "You can't load an empty audio collection!";
    pub const LOAD_NO_SOURCE: &str = "Please select a source before attempting to load.";

    pub const RESUMED: &str = "Playback resumed successfully.";
    pub const PAUSED: &str = "Playback paused successfully.";
    pub const PLAY_PAUSE_NOT_LOADED: &str =
        "Please load a source before attempting to pause or resume playback.";

    pub const REPEAT_CHANGED: &str = "Repeat mode changed to";
    pub const REPEAT_NOT_LOADED: &str = "Please load a source before setting the repeat status.";

    pub const SHUFFLE_ON: &str = "Shuffle function activated successfully.";
    pub const SHUFFLE_OFF: &str = "Shuffle function deactivated successfully.";
    pub const SHUFFLE_WRONG_KIND: &str = "The loaded source is not a playlist or an album.";
    pub const SHUFFLE_NOT_LOADED: &str = "Please load a source before using the shuffle function.";

    pub const NOT_PODCAST: &str = "The loaded source is not a podcast.";
    pub const FORWARDED: &str = "Skipped forward successfully.";
    pub const FORWARD_NOT_LOADED: &str = "Please load a source before attempting to forward.";
    pub const REWOUND: &str = "Rewound successfully.";
    pub const BACKWARD_NOT_LOADED: &str = "Please select a source before rewinding.";

    pub const NEXT: &str = "Skipped to next track successfully. The current track is";
    pub const NEXT_NOT_LOADED: &str = "Please load a source before skipping to the next track.";
    pub const PREV: &str = "Returned to previous track successfully. The current track is";
    pub const PREV_NOT_LOADED: &str =
        "Please load a source before returning to the previous track.";

    pub const AD_INSERTED: &str = "Ad inserted successfully.";
    pub const NOT_PLAYING_MUSIC: &str = "is not playing any music.";
}

pub struct Dispatcher {
    catalog: Catalog,
    scheduler: Scheduler,
}

impl Dispatcher {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            scheduler: Scheduler::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run every command in order, collecting outputs
    pub fn run(&mut self, commands: &[Command]) -> Result<Vec<CommandOutput>> {
        let mut outputs = Vec::with_capacity(commands.len());
        for command in commands {
            if let Some(output) = self.dispatch(command)? {
                outputs.push(output);
            }
        }

        tracing::info!(
            commands = commands.len(),
            outputs = outputs.len(),
            ticks = self.scheduler.ticks(),
            "replay complete"
        );
        Ok(outputs)
    }

    /// Tick all sessions, then handle `command`
    ///
    /// Returns `None` for commands that produce no output: commands outside
    /// the player and ad breaks for premium users. Errors are reserved for
    /// contract violations such as out-of-order timestamps.
    pub fn dispatch(&mut self, command: &Command) -> Result<Option<CommandOutput>> {
        self.scheduler.tick(&mut self.catalog, command.timestamp)?;

        let Some(kind) = command.kind() else {
            tracing::warn!(command = %command.command, "skipping unsupported command");
            return Ok(None);
        };

        let Some(user) = self.catalog.user(&command.username) else {
            return Ok(Some(CommandOutput::message(
                command,
                format!("The username {} doesn't exist.", command.username),
            )));
        };
        let premium = user.premium;

        tracing::debug!(user = %command.username, %kind, timestamp = command.timestamp, "dispatch");

        let output = match kind {
            CommandKind::Load => Some(self.load(command)?),
            CommandKind::Status => {
                let stats = self.session(command)?.status();
                Some(CommandOutput::stats(command, stats))
            }
            CommandKind::AdBreak if premium => None,
            CommandKind::AdBreak => Some(ad_break(self.session(command)?, command)),
            CommandKind::PlayPause => Some(play_pause(self.session(command)?, command)?),
            CommandKind::Repeat => Some(repeat(self.session(command)?, command)?),
            CommandKind::Shuffle => Some(shuffle(self.session(command)?, command)?),
            CommandKind::Forward => Some(forward(self.session(command)?, command)?),
            CommandKind::Backward => Some(backward(self.session(command)?, command)?),
            CommandKind::Next => Some(next(self.session(command)?, command)?),
            CommandKind::Prev => Some(prev(self.session(command)?, command)?),
        };

        self.drain_events(&command.username);
        Ok(output)
    }

    fn load(&mut self, command: &Command) -> Result<CommandOutput> {
        let reply = |message: &str| CommandOutput::message(command, message);

        let kind = command
            .source_type
            .as_deref()
            .and_then(|t| t.parse::<SourceKind>().ok());
        let (Some(kind), Some(name)) = (kind, command.name.as_deref()) else {
            return Ok(reply(messages::LOAD_NO_SOURCE));
        };

        let source = match self.catalog.resolve(kind, name) {
            Ok(source) => source,
            Err(CoreError::EmptyCollection(_)) => return Ok(reply(messages::LOAD_EMPTY)),
            Err(err) => {
                tracing::debug!(%kind, name, error = %err, "load failed");
                return Ok(reply(messages::LOAD_NO_SOURCE));
            }
        };

        match self.session(command)?.load(source, command.timestamp) {
            Ok(()) => Ok(reply(messages::LOADED)),
            Err(PlaybackError::EmptySource) => Ok(reply(messages::LOAD_EMPTY)),
            Err(err) => Err(err.into()),
        }
    }

    fn session(&mut self, command: &Command) -> Result<&mut PlaybackSession> {
        // every library user gets a session when the catalog is built
        self.catalog
            .session_mut(&command.username)
            .ok_or_else(|| ReplayError::InvalidFeed(format!("no session for {}", command.username)))
    }

    fn drain_events(&mut self, username: &str) {
        if let Some(session) = self.catalog.session_mut(username) {
            for event in session.drain_events() {
                tracing::debug!(user = username, ?event, "playback event");
            }
        }
    }
}

// ===== Handlers =====

fn play_pause(session: &mut PlaybackSession, command: &Command) -> Result<CommandOutput> {
    let message = match session.toggle_play() {
        Ok(true) => messages::RESUMED.to_string(),
        Ok(false) => messages::PAUSED.to_string(),
        Err(err) => explain(err, messages::PLAY_PAUSE_NOT_LOADED, "")?,
    };
    Ok(CommandOutput::message(command, message))
}

fn repeat(session: &mut PlaybackSession, command: &Command) -> Result<CommandOutput> {
    let message = match session.cycle_repeat() {
        Ok(mode) => format!("{} {}.", messages::REPEAT_CHANGED, mode.name().to_lowercase()),
        Err(err) => explain(err, messages::REPEAT_NOT_LOADED, "")?,
    };
    Ok(CommandOutput::message(command, message))
}

fn shuffle(session: &mut PlaybackSession, command: &Command) -> Result<CommandOutput> {
    // negative seeds are reinterpreted, not rejected
    let seed = command.seed.unwrap_or(0) as u64;
    let message = match session.toggle_shuffle(seed) {
        Ok(true) => messages::SHUFFLE_ON.to_string(),
        Ok(false) => messages::SHUFFLE_OFF.to_string(),
        Err(err) => explain(err, messages::SHUFFLE_NOT_LOADED, messages::SHUFFLE_WRONG_KIND)?,
    };
    Ok(CommandOutput::message(command, message))
}

fn forward(session: &mut PlaybackSession, command: &Command) -> Result<CommandOutput> {
    let message = match session.forward() {
        Ok(()) => messages::FORWARDED.to_string(),
        Err(err) => explain(err, messages::FORWARD_NOT_LOADED, messages::NOT_PODCAST)?,
    };
    Ok(CommandOutput::message(command, message))
}

fn backward(session: &mut PlaybackSession, command: &Command) -> Result<CommandOutput> {
    let message = match session.backward() {
        Ok(()) => messages::REWOUND.to_string(),
        Err(err) => explain(err, messages::BACKWARD_NOT_LOADED, messages::NOT_PODCAST)?,
    };
    Ok(CommandOutput::message(command, message))
}

fn next(session: &mut PlaybackSession, command: &Command) -> Result<CommandOutput> {
    let message = match session.next() {
        Ok(Step::Playing(item)) => format!("{} {}.", messages::NEXT, item),
        Ok(Step::Ended) => messages::NEXT_NOT_LOADED.to_string(),
        Err(err) => explain(err, messages::NEXT_NOT_LOADED, "")?,
    };
    Ok(CommandOutput::message(command, message))
}

fn prev(session: &mut PlaybackSession, command: &Command) -> Result<CommandOutput> {
    let message = match session.prev() {
        Ok(Step::Playing(item)) => format!("{} {}.", messages::PREV, item),
        Ok(Step::Ended) => messages::PREV_NOT_LOADED.to_string(),
        Err(err) => explain(err, messages::PREV_NOT_LOADED, "")?,
    };
    Ok(CommandOutput::message(command, message))
}

/// Queue an ad for a free user's music
fn ad_break(session: &mut PlaybackSession, command: &Command) -> CommandOutput {
    let message = match session.queue_ad(command.price.unwrap_or(0)) {
        Ok(()) => messages::AD_INSERTED.to_string(),
        Err(_) => format!("{} {}", command.username, messages::NOT_PLAYING_MUSIC),
    };
    CommandOutput::message(command, message)
}

/// Translate a playback failure into a listener-facing message
///
/// Clock violations are not recoverable and are passed through.
fn explain(err: PlaybackError, not_loaded: &str, wrong_kind: &str) -> Result<String> {
    match err {
        PlaybackError::InvalidTimestamp { .. } => Err(err.into()),
        PlaybackError::WrongSourceKind { .. } => Ok(wrong_kind.to_string()),
        PlaybackError::NotLoaded | PlaybackError::EmptySource => Ok(not_loaded.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_core::Library;
    use tempo_playback::PlaybackConfig;

    fn dispatcher() -> Dispatcher {
        let library = Library::from_json(
            r#"{
                "songs": [
                    {"name": "A", "duration": 100},
                    {"name": "B", "duration": 150}
                ],
                "podcasts": [{"name": "Cast", "owner": "h", "episodes": [
                    {"name": "E1", "duration": 60}
                ]}],
                "playlists": [{"name": "Mix", "owner": "ann", "songs": ["A", "B"]}],
                "users": [{"username": "ann"}, {"username": "vip", "premium": true}]
            }"#,
        )
        .unwrap();
        Dispatcher::new(Catalog::new(library, &PlaybackConfig::default()))
    }

    fn message(dispatcher: &mut Dispatcher, command: Command) -> String {
        dispatcher
            .dispatch(&command)
            .unwrap()
            .and_then(|o| o.message)
            .unwrap()
    }

    #[test]
    fn unknown_user_gets_message() {
        let mut d = dispatcher();
        assert_eq!(
            message(&mut d, Command::new("status", "ghost", 1)),
            "The username ghost doesn't exist."
        );
    }

    #[test]
    fn unsupported_command_is_skipped() {
        let mut d = dispatcher();
        assert_eq!(d.dispatch(&Command::new("search", "ann", 1)).unwrap(), None);
    }

    #[test]
    fn load_unknown_source_asks_for_selection() {
        let mut d = dispatcher();
        assert_eq!(
            message(&mut d, Command::load("ann", 1, "song", "Nope")),
            messages::LOAD_NO_SOURCE
        );
        assert_eq!(
            message(&mut d, Command::new("load", "ann", 2)),
            messages::LOAD_NO_SOURCE
        );
    }

    #[test]
    fn repeat_message_uses_lowercase_mode() {
        let mut d = dispatcher();
        message(&mut d, Command::load("ann", 0, "playlist", "Mix"));
        assert_eq!(
            message(&mut d, Command::new("repeat", "ann", 1)),
            "Repeat mode changed to repeat all."
        );
    }

    #[test]
    fn forward_on_playlist_is_wrong_kind() {
        let mut d = dispatcher();
        message(&mut d, Command::load("ann", 0, "playlist", "Mix"));
        assert_eq!(
            message(&mut d, Command::new("forward", "ann", 1)),
            messages::NOT_PODCAST
        );
    }

    #[test]
    fn premium_ad_break_is_silent() {
        let mut d = dispatcher();
        message(&mut d, Command::load("vip", 0, "song", "A"));
        let output = d
            .dispatch(&Command::new("adBreak", "vip", 1).with_price(5))
            .unwrap();
        assert_eq!(output, None);
    }

    #[test]
    fn ad_break_without_music() {
        let mut d = dispatcher();
        assert_eq!(
            message(&mut d, Command::new("adBreak", "ann", 1).with_price(5)),
            "ann is not playing any music."
        );

        message(&mut d, Command::load("ann", 2, "podcast", "Cast"));
        assert_eq!(
            message(&mut d, Command::new("adBreak", "ann", 3).with_price(5)),
            "ann is not playing any music."
        );
    }

    #[test]
    fn out_of_order_feed_is_fatal() {
        let mut d = dispatcher();
        d.dispatch(&Command::new("status", "ann", 10)).unwrap();
        assert!(d.dispatch(&Command::new("status", "ann", 5)).is_err());
    }
}

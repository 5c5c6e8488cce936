//! Tempo Replay Library
//!
//! Replays a JSON command feed against a library of songs, playlists,
//! albums and podcasts, producing one output record per player command.
//!
//! This library exposes the core components for testing purposes.

pub mod catalog;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod output;
pub mod scheduler;

// Re-export commonly used types for convenience
pub use catalog::Catalog;
pub use command::{Command, CommandKind};
pub use config::ReplayConfig;
pub use dispatcher::Dispatcher;
pub use error::{ReplayError, Result};
pub use output::CommandOutput;
pub use scheduler::Scheduler;

use tempo_core::Library;
use tempo_playback::PlaybackConfig;

/// Run `commands` against a fresh catalog built from `library`
pub fn replay(
    library: Library,
    commands: &[Command],
    config: &PlaybackConfig,
) -> Result<Vec<CommandOutput>> {
    let mut dispatcher = Dispatcher::new(Catalog::new(library, config));
    dispatcher.run(commands)
}

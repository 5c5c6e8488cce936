//! Per-command output records

use crate::command::Command;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tempo_playback::PlaybackStatus;

/// Result of one dispatched command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub command: String,
    pub user: String,
    pub timestamp: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PlaybackStatus>,
}

impl CommandOutput {
    fn base(command: &Command) -> Self {
        Self {
            command: command.command.clone(),
            user: command.username.clone(),
            timestamp: command.timestamp,
            message: None,
            stats: None,
        }
    }

    pub fn message(command: &Command, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::base(command)
        }
    }

    pub fn stats(command: &Command, stats: PlaybackStatus) -> Self {
        Self {
            stats: Some(stats),
            ..Self::base(command)
        }
    }
}

/// Write outputs as a JSON array
pub fn write_outputs<W: Write>(mut writer: W, outputs: &[CommandOutput], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, outputs)?;
    } else {
        serde_json::to_writer(&mut writer, outputs)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

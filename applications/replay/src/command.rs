//! Command feed input

use crate::error::{ReplayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Player commands the replay understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Load,
    PlayPause,
    Repeat,
    Shuffle,
    Forward,
    Backward,
    Next,
    Prev,
    Status,
    AdBreak,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Load => "load",
            CommandKind::PlayPause => "playPause",
            CommandKind::Repeat => "repeat",
            CommandKind::Shuffle => "shuffle",
            CommandKind::Forward => "forward",
            CommandKind::Backward => "backward",
            CommandKind::Next => "next",
            CommandKind::Prev => "prev",
            CommandKind::Status => "status",
            CommandKind::AdBreak => "adBreak",
        }
    }
}

impl FromStr for CommandKind {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self> {
        let kind = match s {
            "load" => CommandKind::Load,
            "playPause" => CommandKind::PlayPause,
            "repeat" => CommandKind::Repeat,
            "shuffle" => CommandKind::Shuffle,
            "forward" => CommandKind::Forward,
            "backward" => CommandKind::Backward,
            "next" => CommandKind::Next,
            "prev" => CommandKind::Prev,
            "status" => CommandKind::Status,
            "adBreak" => CommandKind::AdBreak,
            other => {
                return Err(ReplayError::InvalidFeed(format!(
                    "unsupported command: {other}"
                )))
            }
        };
        Ok(kind)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the command feed
///
/// Fields the replay does not use (search filters, page names, ..) are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Command name as it appears in the feed
    pub command: String,

    pub username: String,

    pub timestamp: u64,

    /// Source type for `load`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    /// Source name for `load`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Shuffle seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,

    /// Ad break price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
}

impl Command {
    pub fn new(command: impl Into<String>, username: impl Into<String>, timestamp: u64) -> Self {
        Self {
            command: command.into(),
            username: username.into(),
            timestamp,
            source_type: None,
            name: None,
            seed: None,
            price: None,
        }
    }

    /// `load` command for a named source
    pub fn load(
        username: impl Into<String>,
        timestamp: u64,
        source_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            source_type: Some(source_type.into()),
            name: Some(name.into()),
            ..Self::new(CommandKind::Load.as_str(), username, timestamp)
        }
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    /// Parsed command name, `None` for commands outside the player
    pub fn kind(&self) -> Option<CommandKind> {
        self.command.parse().ok()
    }
}

/// Parse a JSON command feed
pub fn parse_commands(json: &str) -> Result<Vec<Command>> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a command feed file
pub fn load_commands(path: impl AsRef<Path>) -> Result<Vec<Command>> {
    let json = std::fs::read_to_string(path)?;
    parse_commands(&json)
}

//! Command vocabulary: what input collaborators translate raw input into.
//!
//! The navigator never sees key codes or button clicks, only [`Command`]s.
//! Values are not range-checked here: clamping is the navigator's job, which is
//! what makes any integer (negative, huge, past the end) safe to send.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Move the cursor by a signed number of snapshots.
    JumpBy(i64),
    /// Move the cursor to an absolute snapshot index.
    JumpTo(i64),
}

impl Command {
    /// The discrete step controls: -100, -10, -1, +1, +10, +100.
    pub const STEPS: [Command; 6] = [
        Command::JumpBy(-100),
        Command::JumpBy(-10),
        Command::JumpBy(-1),
        Command::JumpBy(1),
        Command::JumpBy(10),
        Command::JumpBy(100),
    ];

    /// Directional "previous".
    pub const BACK: Command = Command::JumpBy(-1);
    /// Directional "next".
    pub const FORWARD: Command = Command::JumpBy(1);
}

/// Textual form: `+10`, `-1` for relative jumps, `=5` or `@5` for absolute.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::JumpBy(delta) => write!(f, "{delta:+}"),
            Command::JumpTo(index) => write!(f, "={index}"),
        }
    }
}

/// Error parsing a [`Command`] from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid navigation command {input:?}: expected +N, -N, =N or @N")]
pub struct CommandParseError {
    pub input: String,
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || CommandParseError { input: s.to_string() };

        if let Some(rest) = s.strip_prefix('=').or_else(|| s.strip_prefix('@')) {
            return rest.trim().parse().map(Command::JumpTo).map_err(|_| err());
        }
        if s.starts_with('+') || s.starts_with('-') {
            return s.parse().map(Command::JumpBy).map_err(|_| err());
        }
        Err(err())
    }
}

/// Parse a whitespace- or comma-separated command script (`"+1 +10 =3 -100"`).
pub fn parse_commands(script: &str) -> Result<Vec<Command>, CommandParseError> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

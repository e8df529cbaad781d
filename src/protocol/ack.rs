//! Server-side failures reported through `ACK` lines.
//!
//! The daemon rejects a command with a single line of the form:
//!
//! ```text
//! ACK [<code>@<index>] {<command>} <message>
//! ```
//!
//! where `index` is the position of the failing command inside a command
//! list (zero outside of lists) and `command` may be empty when the daemon
//! could not even tell which command was meant.

use std::str::FromStr;

use thiserror::Error;

use crate::error::Error;

/// A parsed `ACK` line.
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
#[error("[{code}@{index}] {{{command}}} {message}")]
pub struct Ack {
    /// Numeric error code, see [`AckCode`].
    pub code: u32,

    /// Zero-based index of the failing command inside a command list.
    pub index: u32,

    /// Name of the command that failed, possibly empty.
    pub command: String,

    /// Human readable message from the daemon.
    pub message: String,
}

impl Ack {
    /// Wire prefix of an `ACK` line.
    pub(crate) const PREFIX: &'static str = "ACK";

    /// Classifies the numeric code.
    #[must_use]
    pub fn kind(&self) -> AckCode {
        AckCode::from(self.code)
    }
}

/// Well-known `ACK` codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AckCode {
    /// Command sent outside of a list where only list use is valid.
    NotList,
    /// Bad command arguments.
    Arg,
    /// Wrong password.
    Password,
    /// Not permitted with the current credentials.
    Permission,
    /// Command does not exist.
    UnknownCommand,
    /// Referenced object does not exist.
    NoExist,
    /// Stored playlist would grow beyond its limit.
    PlaylistMax,
    /// Daemon-side system error.
    System,
    /// Stored playlist could not be loaded.
    PlaylistLoad,
    /// A database update is already running.
    UpdateAlready,
    /// Player is in an inconsistent state.
    PlayerSync,
    /// Object already exists.
    Exist,
    /// Any code not listed above.
    Unknown,
}

impl From<u32> for AckCode {
    fn from(code: u32) -> Self {
        match code {
            1 => Self::NotList,
            2 => Self::Arg,
            3 => Self::Password,
            4 => Self::Permission,
            5 => Self::UnknownCommand,
            50 => Self::NoExist,
            51 => Self::PlaylistMax,
            52 => Self::System,
            53 => Self::PlaylistLoad,
            54 => Self::UpdateAlready,
            55 => Self::PlayerSync,
            56 => Self::Exist,
            _ => Self::Unknown,
        }
    }
}

/// Parses a full `ACK` line, including the `ACK` prefix.
///
/// # Errors
///
/// Returns [`Error::malformed`] when the bracketed code and index or the
/// braced command name are missing or not numeric.
impl FromStr for Ack {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || Error::malformed(format!("invalid ACK line: {line}"));

        let rest = line
            .strip_prefix(Self::PREFIX)
            .ok_or_else(malformed)?
            .trim_start();

        let (location, rest) = rest
            .strip_prefix('[')
            .and_then(|rest| rest.split_once(']'))
            .ok_or_else(malformed)?;
        let (code, index) = location.split_once('@').ok_or_else(malformed)?;
        let code = code.trim().parse().map_err(|_| malformed())?;
        let index = index.trim().parse().map_err(|_| malformed())?;

        let (command, rest) = rest
            .trim_start()
            .strip_prefix('{')
            .and_then(|rest| rest.split_once('}'))
            .ok_or_else(malformed)?;
        let message = rest.strip_prefix(' ').unwrap_or(rest);

        Ok(Self {
            code,
            index,
            command: command.to_owned(),
            message: message.to_owned(),
        })
    }
}

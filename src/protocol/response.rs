//! Line-level decoding of daemon responses.
//!
//! A response is a sequence of `key: value` lines terminated by one of:
//!
//! * `OK` - the command succeeded
//! * `list_OK` - one member of a discrete command list succeeded
//! * `ACK [...]` - the command failed, see [`Ack`]

use std::{fmt, str::FromStr};

use super::Ack;
use crate::error::Error;

/// One `key: value` line of a response.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Pair {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// Splits a line on its first colon and drops one leading space from the
/// value.
///
/// # Errors
///
/// Returns [`Error::malformed`] when the line has no colon or an empty key.
impl FromStr for Pair {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.split_once(':') {
            Some((key, value)) if !key.is_empty() => {
                let value = value.strip_prefix(' ').unwrap_or(value);
                Ok(Self::new(key, value))
            }
            _ => Err(Error::malformed(format!("not a key/value pair: {line}"))),
        }
    }
}

/// A single classified response line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Line {
    /// End of a successful response.
    Ok,
    /// End of one member's response in a discrete command list.
    ListOk,
    /// End of a failed response.
    Ack(Ack),
    /// Payload.
    Pair(Pair),
}

impl Line {
    const OK: &'static str = "OK";
    const LIST_OK: &'static str = "list_OK";
}

impl FromStr for Line {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line {
            Self::OK => Ok(Self::Ok),
            Self::LIST_OK => Ok(Self::ListOk),
            _ if line.starts_with(Ack::PREFIX) => line.parse().map(Self::Ack),
            _ => line.parse().map(Self::Pair),
        }
    }
}

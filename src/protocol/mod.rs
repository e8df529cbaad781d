//! Wire types and typed views of the MPD protocol.
//!
//! # Submodules
//!
//! * [`command`] - request encoding and command lists
//! * [`response`] - response line classification
//! * [`ack`] - server-side failures
//! * record views: [`song`], [`status`], [`stats`], [`output`],
//!   [`directory`], [`playlist`], [`entity`], [`queue`], [`idle`]
//!
//! # Records
//!
//! Responses are flat sequences of [`Pair`]s. Typed views implement
//! [`Record`], which folds pairs into a struct using a static table that maps
//! each known key to a decoder. Keys missing from the table are handed to
//! [`Record::decode_other`], which ignores them unless a record overrides it,
//! so that replies from newer daemons still decode. Only a value that cannot
//! be parsed for a *known* key fails decoding.
//!
//! # Usage Example
//!
//! ```
//! use mpdclient::protocol::{self, Pair, Status};
//!
//! let status: Status = protocol::fold([
//!     Pair::new("volume", "80"),
//!     Pair::new("state", "play"),
//! ])?;
//! ```

pub mod ack;
pub mod command;
pub mod directory;
pub mod entity;
pub mod idle;
pub mod output;
pub mod playlist;
pub mod queue;
pub mod response;
pub mod song;
pub mod stats;
pub mod status;
pub mod tag;

pub use ack::{Ack, AckCode};
pub use command::{Argument, Command, CommandList};
pub use directory::Directory;
pub use entity::Entity;
pub use idle::IdleEvents;
pub use output::Output;
pub use playlist::StoredPlaylist;
pub use queue::QueueChange;
pub use response::{Line, Pair};
pub use song::{AudioFormat, SampleBits, Song};
pub use stats::Stats;
pub use status::{Mode, PlayerState, Status};
pub use tag::TagType;

use std::{str::FromStr, time::Duration};

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::error::{Error, Result};

/// Default port of the daemon.
pub const DEFAULT_PORT: u16 = 6600;

/// Maps a response key to the function that stores its value.
pub type Field<T> = (&'static str, fn(&mut T, &str) -> Result<()>);

/// A structure folded from a sequence of response pairs.
pub trait Record: Default + 'static {
    /// Keys that open a new record of this type in a listing.
    ///
    /// Empty for records that span a complete response, like [`Status`].
    const BEGIN: &'static [&'static str];

    /// Keys that end a record of this type in a listing and belong to the
    /// next item.
    const END: &'static [&'static str] = Self::BEGIN;

    /// Decoders for the keys this record knows about.
    const FIELDS: &'static [Field<Self>];

    /// Decodes a key that is not in [`Self::FIELDS`].
    ///
    /// # Errors
    ///
    /// The default implementation ignores the key and never fails.
    fn decode_other(&mut self, key: &str, value: &str) -> Result<()> {
        let _ = (key, value);
        Ok(())
    }

    /// Folds one pair into this record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::malformed`] when the value of a known key cannot be
    /// parsed.
    fn decode(&mut self, pair: &Pair) -> Result<()> {
        match Self::FIELDS.iter().find(|(key, _)| *key == pair.key) {
            Some((_, decode)) => decode(self, &pair.value),
            None => self.decode_other(&pair.key, &pair.value),
        }
        .map_err(|e| Error::new(e.kind, format!("{pair}: {}", e.error)))
    }
}

/// Folds all `pairs` into a single record.
///
/// # Errors
///
/// Fails like [`Record::decode`].
pub fn fold<T, I>(pairs: I) -> Result<T>
where
    T: Record,
    I: IntoIterator<Item = Pair>,
{
    let mut record = T::default();
    for pair in pairs {
        record.decode(&pair)?;
    }
    Ok(record)
}

/// Parses a numeric value.
pub(crate) fn number<T>(value: &str) -> Result<T>
where
    T: FromStr,
    Error: From<T::Err>,
{
    Ok(value.trim().parse()?)
}

/// Parses a `0`/`1` flag; any non-zero number counts as set.
pub(crate) fn flag(value: &str) -> Result<bool> {
    number::<i64>(value).map(|n| n != 0)
}

/// Parses fractional seconds.
pub(crate) fn seconds(value: &str) -> Result<Duration> {
    Duration::try_from_secs_f64(number(value)?).map_err(|e| Error::malformed(e.to_string()))
}

/// Parses an RFC 3339 timestamp like `2024-01-31T12:00:00Z`.
pub(crate) fn timestamp(value: &str) -> Result<OffsetDateTime> {
    Ok(OffsetDateTime::parse(value.trim(), &Rfc3339)?)
}

/// Parses a Unix timestamp in seconds.
pub(crate) fn unix_timestamp(value: &str) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(number(value)?).map_err(|e| Error::malformed(e.to_string()))
}

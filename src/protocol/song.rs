//! Songs as reported by the queue, the database and stored playlists.

use std::{collections::BTreeMap, fmt, str::FromStr, time::Duration};

use time::OffsetDateTime;

use super::{number, seconds, timestamp, Entity, Field, Record, TagType};
use crate::error::{Error, Result};

/// A song and its metadata.
///
/// Songs begin with a `file` key in listings. Tag values accumulate per
/// [`TagType`] in the order the daemon sent them, up to
/// [`Song::MAX_TAG_VALUES`] values per tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Song {
    /// URI relative to the music directory, or an absolute URL for streams.
    pub uri: String,

    tags: BTreeMap<TagType, Vec<String>>,

    /// Length of the song; `None` when unknown, e.g. for streams.
    pub duration: Option<Duration>,

    /// Portion of the file that makes up this song, for CUE sheet tracks.
    /// The end is `None` when the song plays until the end of the file.
    pub range: Option<(Duration, Option<Duration>)>,

    pub last_modified: Option<OffsetDateTime>,

    /// Position in the queue; `None` for songs outside of the queue.
    pub pos: Option<u32>,

    /// Queue id; `None` for songs outside of the queue.
    pub id: Option<u32>,

    /// Queue priority, 0 being the lowest.
    pub prio: u8,

    pub format: Option<AudioFormat>,
}

impl Song {
    /// Maximum number of values kept per tag.
    pub const MAX_TAG_VALUES: usize = 64;

    /// Creates a song that has nothing but its URI.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Appends a value to a tag.
    ///
    /// Returns `false` and drops the value when the tag already holds
    /// [`Self::MAX_TAG_VALUES`] values.
    pub fn add_tag(&mut self, tag: TagType, value: impl Into<String>) -> bool {
        let values = self.tags.entry(tag).or_default();
        if values.len() >= Self::MAX_TAG_VALUES {
            return false;
        }
        values.push(value.into());
        true
    }

    pub fn clear_tag(&mut self, tag: TagType) {
        self.tags.remove(&tag);
    }

    /// Returns the `idx`-th value of a tag.
    #[must_use]
    pub fn tag(&self, tag: TagType, idx: usize) -> Option<&str> {
        self.tags(tag).get(idx).map(String::as_str)
    }

    /// Returns all values of a tag.
    #[must_use]
    pub fn tags(&self, tag: TagType) -> &[String] {
        self.tags.get(&tag).map_or(&[], Vec::as_slice)
    }

    pub fn set_pos(&mut self, pos: u32) {
        self.pos = Some(pos);
    }

    /// Duration in whole seconds, or -1 when unknown.
    #[must_use]
    pub fn duration_secs(&self) -> i64 {
        self.duration
            .map_or(-1, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }

    fn parse_range(value: &str) -> Result<(Duration, Option<Duration>)> {
        let (start, end) = value
            .split_once('-')
            .ok_or_else(|| Error::malformed(format!("invalid range {value}")))?;

        let start = if start.is_empty() {
            Duration::ZERO
        } else {
            seconds(start)?
        };
        let end = if end.is_empty() {
            None
        } else {
            Some(seconds(end)?)
        };

        Ok((start, end))
    }
}

impl Record for Song {
    const BEGIN: &'static [&'static str] = &["file"];
    const END: &'static [&'static str] = Entity::BEGIN;

    const FIELDS: &'static [Field<Self>] = &[
        ("file", |song, v| {
            song.uri = v.to_owned();
            Ok(())
        }),
        ("Time", |song, v| {
            // Whole seconds; `duration` refines it when present.
            if song.duration.is_none() {
                song.duration = Some(Duration::from_secs(number(v)?));
            }
            Ok(())
        }),
        ("duration", |song, v| {
            song.duration = Some(seconds(v)?);
            Ok(())
        }),
        ("Range", |song, v| {
            song.range = Some(Self::parse_range(v)?);
            Ok(())
        }),
        ("Last-Modified", |song, v| {
            song.last_modified = Some(timestamp(v)?);
            Ok(())
        }),
        ("Pos", |song, v| {
            song.pos = Some(number(v)?);
            Ok(())
        }),
        ("Id", |song, v| {
            song.id = Some(number(v)?);
            Ok(())
        }),
        ("Prio", |song, v| {
            song.prio = number(v)?;
            Ok(())
        }),
        ("Format", |song, v| {
            song.format = Some(v.parse()?);
            Ok(())
        }),
    ];

    fn decode_other(&mut self, key: &str, value: &str) -> Result<()> {
        if let Ok(tag) = key.parse::<TagType>() {
            if !self.add_tag(tag, value) {
                trace!("dropping excess {tag} value of {}", self.uri);
            }
        }
        Ok(())
    }
}

/// Bit depth of an [`AudioFormat`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SampleBits {
    /// Integer samples of the given width.
    Integer(u8),
    /// 32-bit floating point samples.
    Float,
    /// 1-bit Direct Stream Digital.
    Dsd,
}

/// Sample rate, bit depth and channel count of a song or of the output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub bits: SampleBits,
    pub channels: u8,
}

impl AudioFormat {
    /// Base rate that DSD rates like `dsd64` multiply.
    const DSD_BASE_RATE: u32 = 44_100;
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bits {
            SampleBits::Integer(bits) => {
                write!(f, "{}:{bits}:{}", self.sample_rate, self.channels)
            }
            SampleBits::Float => write!(f, "{}:f:{}", self.sample_rate, self.channels),
            SampleBits::Dsd => write!(
                f,
                "dsd{}:{}",
                self.sample_rate / Self::DSD_BASE_RATE,
                self.channels
            ),
        }
    }
}

/// Parses `rate:bits:channels`, with `f` for float samples, or
/// `dsdN:channels` for DSD.
impl FromStr for AudioFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [rate, channels] if rate.starts_with("dsd") => {
                let multiplier: u32 = number(&rate[3..])?;
                Ok(Self {
                    sample_rate: multiplier.saturating_mul(Self::DSD_BASE_RATE),
                    bits: SampleBits::Dsd,
                    channels: number(channels)?,
                })
            }
            [rate, bits, channels] => Ok(Self {
                sample_rate: number(rate)?,
                bits: match *bits {
                    "f" => SampleBits::Float,
                    "dsd" => SampleBits::Dsd,
                    bits => SampleBits::Integer(number(bits)?),
                },
                channels: number(channels)?,
            }),
            _ => Err(Error::malformed(format!("invalid audio format {s}"))),
        }
    }
}

//! Player status, as reported by the `status` command.

use std::{fmt, str::FromStr, time::Duration};

use super::{flag, number, seconds, Argument, AudioFormat, Field, Record};
use crate::error::{Error, Result};

/// Playback state of the daemon.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayerState {
    /// No state was reported.
    #[default]
    Unknown,
    Stop,
    Play,
    Pause,
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Stop => write!(f, "stop"),
            Self::Play => write!(f, "play"),
            Self::Pause => write!(f, "pause"),
        }
    }
}

impl FromStr for PlayerState {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "stop" => Ok(Self::Stop),
            "play" => Ok(Self::Play),
            "pause" => Ok(Self::Pause),
            _ => Err(Error::malformed(format!("{s} is not a player state"))),
        }
    }
}

/// Setting of the `single` and `consume` switches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    #[default]
    Off,
    On,
    /// Applies to the current song only, then switches off.
    Oneshot,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "oneshot" => Ok(Self::Oneshot),
            s if flag(s)? => Ok(Self::On),
            _ => Ok(Self::Off),
        }
    }
}

impl Argument for Mode {
    fn write_arg(&self, out: &mut String) {
        out.push_str(match self {
            Self::Off => "0",
            Self::On => "1",
            Self::Oneshot => "oneshot",
        });
    }
}

/// Snapshot of the player.
///
/// Spans a complete `status` response. Absent keys leave fields at their
/// defaults: `None` for volume, positions and times, zero for counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    /// Volume in percent; `None` when the daemon has no mixer.
    pub volume: Option<u8>,
    pub repeat: bool,
    pub random: bool,
    pub single: Mode,
    pub consume: Mode,

    /// Version of the queue, bumped on every change.
    pub queue_version: u32,
    pub queue_length: u32,

    pub state: PlayerState,

    /// Crossfade in seconds.
    pub crossfade: u32,

    /// Queue position of the current song.
    pub song: Option<u32>,
    /// Queue id of the current song.
    pub song_id: Option<u32>,
    pub next_song: Option<u32>,
    pub next_song_id: Option<u32>,

    /// Position within the current song.
    pub elapsed: Option<Duration>,
    /// Length of the current song.
    pub total: Option<Duration>,

    /// Instantaneous bit rate in kbit/s.
    pub bit_rate: u32,
    pub audio: Option<AudioFormat>,

    /// Id of the running database update job.
    pub updating_db: Option<u32>,

    /// Last player error, like a file that failed to decode.
    pub error: Option<String>,
}

impl Status {
    /// Parses `elapsed:total` in whole seconds, as sent in the `time` key.
    fn parse_time(value: &str) -> Result<(Duration, Duration)> {
        let (elapsed, total) = value
            .split_once(':')
            .ok_or_else(|| Error::malformed(format!("invalid time {value}")))?;
        Ok((
            Duration::from_secs(number(elapsed)?),
            Duration::from_secs(number(total)?),
        ))
    }
}

impl Record for Status {
    const BEGIN: &'static [&'static str] = &[];

    const FIELDS: &'static [Field<Self>] = &[
        ("volume", |status, v| {
            // Daemons without a mixer report -1.
            let volume: i32 = number(v)?;
            status.volume = u8::try_from(volume).ok();
            Ok(())
        }),
        ("repeat", |status, v| {
            status.repeat = flag(v)?;
            Ok(())
        }),
        ("random", |status, v| {
            status.random = flag(v)?;
            Ok(())
        }),
        ("single", |status, v| {
            status.single = v.parse()?;
            Ok(())
        }),
        ("consume", |status, v| {
            status.consume = v.parse()?;
            Ok(())
        }),
        ("playlist", |status, v| {
            status.queue_version = number(v)?;
            Ok(())
        }),
        ("playlistlength", |status, v| {
            status.queue_length = number(v)?;
            Ok(())
        }),
        ("state", |status, v| {
            status.state = v.parse()?;
            Ok(())
        }),
        ("xfade", |status, v| {
            status.crossfade = number(v)?;
            Ok(())
        }),
        ("song", |status, v| {
            status.song = Some(number(v)?);
            Ok(())
        }),
        ("songid", |status, v| {
            status.song_id = Some(number(v)?);
            Ok(())
        }),
        ("nextsong", |status, v| {
            status.next_song = Some(number(v)?);
            Ok(())
        }),
        ("nextsongid", |status, v| {
            status.next_song_id = Some(number(v)?);
            Ok(())
        }),
        ("time", |status, v| {
            // Whole seconds; `elapsed` and `duration` refine them.
            let (elapsed, total) = Self::parse_time(v)?;
            status.elapsed.get_or_insert(elapsed);
            status.total.get_or_insert(total);
            Ok(())
        }),
        ("elapsed", |status, v| {
            status.elapsed = Some(seconds(v)?);
            Ok(())
        }),
        ("duration", |status, v| {
            status.total = Some(seconds(v)?);
            Ok(())
        }),
        ("bitrate", |status, v| {
            status.bit_rate = number(v)?;
            Ok(())
        }),
        ("audio", |status, v| {
            status.audio = Some(v.parse()?);
            Ok(())
        }),
        ("updating_db", |status, v| {
            status.updating_db = Some(number(v)?);
            Ok(())
        }),
        ("error", |status, v| {
            status.error = Some(v.to_owned());
            Ok(())
        }),
    ];
}

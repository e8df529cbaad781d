//! Database and uptime statistics, as reported by the `stats` command.

use std::time::Duration;

use time::OffsetDateTime;

use super::{number, unix_timestamp, Field, Record};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub artists: u32,
    pub albums: u32,
    pub songs: u32,

    /// Time since the daemon started.
    pub uptime: Duration,
    /// Time spent playing since the daemon started.
    pub playtime: Duration,
    /// Sum of the durations of all songs in the database.
    pub db_playtime: Duration,

    /// Completion time of the last database update.
    pub db_update: Option<OffsetDateTime>,
}

impl Record for Stats {
    const BEGIN: &'static [&'static str] = &[];

    const FIELDS: &'static [Field<Self>] = &[
        ("artists", |stats, v| {
            stats.artists = number(v)?;
            Ok(())
        }),
        ("albums", |stats, v| {
            stats.albums = number(v)?;
            Ok(())
        }),
        ("songs", |stats, v| {
            stats.songs = number(v)?;
            Ok(())
        }),
        ("uptime", |stats, v| {
            stats.uptime = Duration::from_secs(number(v)?);
            Ok(())
        }),
        ("playtime", |stats, v| {
            stats.playtime = Duration::from_secs(number(v)?);
            Ok(())
        }),
        ("db_playtime", |stats, v| {
            stats.db_playtime = Duration::from_secs(number(v)?);
            Ok(())
        }),
        ("db_update", |stats, v| {
            stats.db_update = Some(unix_timestamp(v)?);
            Ok(())
        }),
    ];
}

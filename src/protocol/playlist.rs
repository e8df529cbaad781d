//! Stored playlists, as listed by `listplaylists` and `lsinfo`.

use time::OffsetDateTime;

use super::{timestamp, Entity, Field, Record};

/// A playlist file kept by the daemon, not to be confused with the queue.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoredPlaylist {
    /// Name of the playlist, or its path for playlists inside the music
    /// directory.
    pub path: String,
    pub last_modified: Option<OffsetDateTime>,
}

impl Record for StoredPlaylist {
    const BEGIN: &'static [&'static str] = &["playlist"];
    const END: &'static [&'static str] = Entity::BEGIN;

    const FIELDS: &'static [Field<Self>] = &[
        ("playlist", |playlist, v| {
            playlist.path = v.to_owned();
            Ok(())
        }),
        ("Last-Modified", |playlist, v| {
            playlist.last_modified = Some(timestamp(v)?);
            Ok(())
        }),
    ];
}

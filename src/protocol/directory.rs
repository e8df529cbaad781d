//! Directories in the music database.

use time::OffsetDateTime;

use super::{timestamp, Entity, Field, Record};

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Directory {
    /// Path relative to the music directory.
    pub path: String,
    pub last_modified: Option<OffsetDateTime>,
}

impl Record for Directory {
    const BEGIN: &'static [&'static str] = &["directory"];
    const END: &'static [&'static str] = Entity::BEGIN;

    const FIELDS: &'static [Field<Self>] = &[
        ("directory", |dir, v| {
            dir.path = v.to_owned();
            Ok(())
        }),
        ("Last-Modified", |dir, v| {
            dir.last_modified = Some(timestamp(v)?);
            Ok(())
        }),
    ];
}

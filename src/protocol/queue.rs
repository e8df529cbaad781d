//! Brief queue change records, as sent by `plchangesposid`.

use super::{number, Field, Record};

/// A queue slot whose song changed since some queue version.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueueChange {
    pub position: u32,
    pub id: u32,
}

impl Record for QueueChange {
    const BEGIN: &'static [&'static str] = &["cpos"];

    const FIELDS: &'static [Field<Self>] = &[
        ("cpos", |change, v| {
            change.position = number(v)?;
            Ok(())
        }),
        ("Id", |change, v| {
            change.id = number(v)?;
            Ok(())
        }),
    ];
}

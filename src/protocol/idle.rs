//! Subsystem change notifications used by idle mode.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// A set of daemon subsystems, as reported in `changed` lines.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct IdleEvents: u32 {
        /// The song database changed after an update.
        const DATABASE = 1 << 0;
        /// A stored playlist was modified, created, renamed or deleted.
        const STORED_PLAYLIST = 1 << 1;
        /// The queue changed.
        const PLAYLIST = 1 << 2;
        /// Playback was started, stopped, paused or seeked.
        const PLAYER = 1 << 3;
        /// The volume changed.
        const MIXER = 1 << 4;
        /// An output was enabled or disabled.
        const OUTPUT = 1 << 5;
        /// Repeat, random, single, consume or crossfade changed.
        const OPTIONS = 1 << 6;
        /// A database update started or finished.
        const UPDATE = 1 << 7;
        const STICKER = 1 << 8;
        const SUBSCRIPTION = 1 << 9;
        const MESSAGE = 1 << 10;
    }
}

impl IdleEvents {
    const NAMES: &'static [(Self, &'static str)] = &[
        (Self::DATABASE, "database"),
        (Self::STORED_PLAYLIST, "stored_playlist"),
        (Self::PLAYLIST, "playlist"),
        (Self::PLAYER, "player"),
        (Self::MIXER, "mixer"),
        (Self::OUTPUT, "output"),
        (Self::OPTIONS, "options"),
        (Self::UPDATE, "update"),
        (Self::STICKER, "sticker"),
        (Self::SUBSCRIPTION, "subscription"),
        (Self::MESSAGE, "message"),
    ];

    /// Looks up a subsystem by its wire name.
    #[must_use]
    pub fn from_subsystem(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find_map(|(event, n)| (*n == name).then_some(*event))
    }

    /// Wire names of all subsystems in this set.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .iter()
            .filter(move |(event, _)| self.contains(*event))
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for IdleEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

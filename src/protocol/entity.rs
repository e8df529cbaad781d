//! Mixed database listings, as returned by `lsinfo`, `listall` and
//! `listallinfo`.

use super::{Directory, Pair, Record, Song, StoredPlaylist};
use crate::error::Result;

/// One item of a database listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    Directory(Directory),
    Song(Song),
    Playlist(StoredPlaylist),
}

impl Entity {
    /// Keys that open an entity; any of them also closes the previous one.
    pub const BEGIN: &'static [&'static str] = &["directory", "file", "playlist"];

    /// Starts an entity from its opening pair.
    ///
    /// Returns `None` when `pair` does not open an entity.
    ///
    /// # Errors
    ///
    /// Fails when the opening value cannot be decoded.
    pub fn begin(pair: &Pair) -> Result<Option<Self>> {
        let mut entity = match pair.key.as_str() {
            "directory" => Self::Directory(Directory::default()),
            "file" => Self::Song(Song::default()),
            "playlist" => Self::Playlist(StoredPlaylist::default()),
            _ => return Ok(None),
        };
        entity.decode(pair)?;
        Ok(Some(entity))
    }

    /// Folds one more pair into the entity.
    ///
    /// # Errors
    ///
    /// Fails like [`Record::decode`].
    pub fn decode(&mut self, pair: &Pair) -> Result<()> {
        match self {
            Self::Directory(directory) => directory.decode(pair),
            Self::Song(song) => song.decode(pair),
            Self::Playlist(playlist) => playlist.decode(pair),
        }
    }

    /// Path of the directory or playlist, or URI of the song.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Directory(directory) => &directory.path,
            Self::Song(song) => &song.uri,
            Self::Playlist(playlist) => &playlist.path,
        }
    }

    #[must_use]
    pub fn as_song(&self) -> Option<&Song> {
        match self {
            Self::Song(song) => Some(song),
            _ => None,
        }
    }
}

//! Song metadata tag names.

use std::{fmt, str::FromStr};

use crate::error::Error;

/// A metadata tag the daemon can report for a song.
///
/// Tag names are matched case-insensitively on the wire, so both `Artist`
/// and `artist` parse to [`TagType::Artist`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagType {
    Artist,
    ArtistSort,
    Album,
    AlbumSort,
    AlbumArtist,
    AlbumArtistSort,
    Title,
    TitleSort,
    Track,
    Name,
    Genre,
    Mood,
    Date,
    OriginalDate,
    Composer,
    ComposerSort,
    Performer,
    Conductor,
    Work,
    Ensemble,
    Movement,
    MovementNumber,
    Location,
    Grouping,
    Comment,
    Disc,
    Label,
    MusicBrainzArtistId,
    MusicBrainzAlbumId,
    MusicBrainzAlbumArtistId,
    MusicBrainzTrackId,
    MusicBrainzReleaseTrackId,
    MusicBrainzWorkId,
}

impl TagType {
    /// Wire names, in declaration order.
    const NAMES: &'static [(Self, &'static str)] = &[
        (Self::Artist, "Artist"),
        (Self::ArtistSort, "ArtistSort"),
        (Self::Album, "Album"),
        (Self::AlbumSort, "AlbumSort"),
        (Self::AlbumArtist, "AlbumArtist"),
        (Self::AlbumArtistSort, "AlbumArtistSort"),
        (Self::Title, "Title"),
        (Self::TitleSort, "TitleSort"),
        (Self::Track, "Track"),
        (Self::Name, "Name"),
        (Self::Genre, "Genre"),
        (Self::Mood, "Mood"),
        (Self::Date, "Date"),
        (Self::OriginalDate, "OriginalDate"),
        (Self::Composer, "Composer"),
        (Self::ComposerSort, "ComposerSort"),
        (Self::Performer, "Performer"),
        (Self::Conductor, "Conductor"),
        (Self::Work, "Work"),
        (Self::Ensemble, "Ensemble"),
        (Self::Movement, "Movement"),
        (Self::MovementNumber, "MovementNumber"),
        (Self::Location, "Location"),
        (Self::Grouping, "Grouping"),
        (Self::Comment, "Comment"),
        (Self::Disc, "Disc"),
        (Self::Label, "Label"),
        (Self::MusicBrainzArtistId, "MUSICBRAINZ_ARTISTID"),
        (Self::MusicBrainzAlbumId, "MUSICBRAINZ_ALBUMID"),
        (Self::MusicBrainzAlbumArtistId, "MUSICBRAINZ_ALBUMARTISTID"),
        (Self::MusicBrainzTrackId, "MUSICBRAINZ_TRACKID"),
        (Self::MusicBrainzReleaseTrackId, "MUSICBRAINZ_RELEASETRACKID"),
        (Self::MusicBrainzWorkId, "MUSICBRAINZ_WORKID"),
    ];

    /// The name the daemon uses for this tag.
    #[must_use]
    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find_map(|(tag, name)| (*tag == self).then_some(*name))
            .unwrap_or_default()
    }

    /// All known tags.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::NAMES.iter().map(|(tag, _)| *tag)
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a tag name case-insensitively.
///
/// # Errors
///
/// Returns [`Error::argument`] for names this crate does not know.
impl FromStr for TagType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .find_map(|(tag, name)| name.eq_ignore_ascii_case(s).then_some(*tag))
            .ok_or_else(|| Error::argument(format!("{s} is not a known tag")))
    }
}

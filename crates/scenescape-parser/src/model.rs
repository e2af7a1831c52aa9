//! Result types produced by the filename interpreters.

use std::fmt;

/// A movie guessed from a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedMovieName {
    /// Cleaned title, never empty.
    pub title: String,
    /// Release year, `None` when the name carried no recognisable year.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub year: Option<u32>,
}

/// A TV episode guessed from a file name.
///
/// `season` and `episode` are either both present or both absent; the
/// interpreter never produces one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedShowName {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub season: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub episode: Option<u32>,
}

impl ParsedShowName {
    /// `(season, episode)` ordering key; absent numbers sort first.
    pub fn sort_key(&self) -> (u32, u32) {
        (self.season.unwrap_or(0), self.episode.unwrap_or(0))
    }
}

/// Coarse media kind guessed from a path before interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MediaKind {
    Movie,
    Episode,
    Unknown,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaKind::Movie => "movie",
            MediaKind::Episode => "tv_episode",
            MediaKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Outcome of interpreting a whole path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "media_type", rename_all = "snake_case"))]
pub enum ParsedMedia {
    Movie(ParsedMovieName),
    Episode(ParsedShowName),
}

impl ParsedMedia {
    pub fn title(&self) -> &str {
        match self {
            ParsedMedia::Movie(movie) => &movie.title,
            ParsedMedia::Episode(episode) => &episode.title,
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            ParsedMedia::Movie(_) => MediaKind::Movie,
            ParsedMedia::Episode(_) => MediaKind::Episode,
        }
    }

    /// Year of a movie; episodes carry none.
    pub fn year(&self) -> Option<u32> {
        match self {
            ParsedMedia::Movie(movie) => movie.year,
            ParsedMedia::Episode(_) => None,
        }
    }
}

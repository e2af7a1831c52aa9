//! Release-tag cleanup and sanity checks on parsed results.
//!
//! The core interpreters leave release tags such as `1080p` or `x264` in the
//! title when they appear before the year or episode marker. These helpers
//! are for callers that want to strip them or flag suspicious results for
//! manual review.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::model::ParsedMedia;
use crate::normalize::normalize_title;

/// Resolution, source, codec, audio and edition tags.
static QUALITY_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:",
        r"720p|1080p|1440p|2160p|4K|UHD|HD|SD|",
        r"BluRay|BRRip|DVDRip|WEBRip|HDTV|WEB-DL|",
        r"x264|x265|H264|H265|HEVC|AVC|",
        r"AAC|AC3|DTS|MP3|FLAC|",
        r"EXTENDED|REMASTERED|DIRECTORS?\.CUT|UNCUT",
        r")\b"
    ))
    .unwrap_or_else(|e| panic!("invalid quality marker pattern: {e}"))
});

/// Earliest year accepted as plausible.
const MIN_PLAUSIBLE_YEAR: u32 = 1900;

/// How far past the current year a release year may point.
const FUTURE_YEAR_SLACK: u32 = 2;

/// Remove release tags from a title and normalize its separators.
///
/// ```
/// use scenescape_parser::clean_title;
///
/// assert_eq!(clean_title("The.Matrix.1080p.BluRay.x264"), "The Matrix");
/// assert_eq!(clean_title("Alien.Directors.Cut"), "Alien");
/// ```
pub fn clean_title(title: &str) -> String {
    normalize_title(&QUALITY_MARKERS.replace_all(title, " "))
}

/// A reason a parsed result may need manual correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    /// The title still contains a release tag.
    QualityMarkerInTitle,
    /// The title is a single word.
    TitleTooShort,
    /// The year lies outside `1900..=current_year + 2`.
    ImplausibleYear(u32),
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::QualityMarkerInTitle => {
                f.write_str("title may contain quality markers, consider cleaning it")
            }
            Suggestion::TitleTooShort => f.write_str("title may be too short, please check it"),
            Suggestion::ImplausibleYear(year) => write!(f, "year {year} may be incorrect"),
        }
    }
}

/// Flag parsed results that look wrong.
///
/// `current_year` is passed in so the check stays deterministic.
pub fn suggest_corrections(media: &ParsedMedia, current_year: u32) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let title = media.title();
    if title.is_empty() {
        return suggestions;
    }

    if QUALITY_MARKERS.is_match(title) {
        suggestions.push(Suggestion::QualityMarkerInTitle);
    }

    if title.split_whitespace().count() < 2 {
        suggestions.push(Suggestion::TitleTooShort);
    }

    if let Some(year) = media.year() {
        if year < MIN_PLAUSIBLE_YEAR || year > current_year.saturating_add(FUTURE_YEAR_SLACK) {
            suggestions.push(Suggestion::ImplausibleYear(year));
        }
    }

    suggestions
}

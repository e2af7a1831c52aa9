//! Movie title and year extraction.

use regex::Captures;
use std::sync::LazyLock;

use crate::model::ParsedMovieName;
use crate::normalize::non_empty_title;
use crate::rules::{first_match, number, Rule};

/// Movie patterns in priority order.
///
/// 1. A lazy title, a separator or `(`, a 4-digit year, then `)` or a
///    separator. The year is not range checked.
/// 2. Fallback: the name minus a trailing 2-4 character extension, no year.
static MOVIE_RULES: LazyLock<Vec<Rule<ParsedMovieName>>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "title_year",
            r"(?i)^(.*?)(?:[.\s_-]|\()([0-9]{4})(?:\)|[.\s_-]).*$",
            title_with_year,
        ),
        Rule::new(
            "title_extension",
            r"(?i)^(.*?)\.[A-Za-z0-9_]{2,4}$",
            title_only,
        ),
    ]
});

fn title_with_year(captures: &Captures<'_>) -> Option<ParsedMovieName> {
    let title = non_empty_title(captures.get(1)?.as_str())?;
    let year = number(captures, 2)?;
    Some(ParsedMovieName {
        title,
        year: Some(year),
    })
}

fn title_only(captures: &Captures<'_>) -> Option<ParsedMovieName> {
    let title = non_empty_title(captures.get(1)?.as_str())?;
    Some(ParsedMovieName { title, year: None })
}

/// Guess a movie title and year from a file name.
///
/// Returns `None` when neither the year pattern nor the extension fallback
/// matches. Never panics.
///
/// ```
/// use scenescape_parser::parse_movie_name;
///
/// let parsed = parse_movie_name("Movie Title (2019).mkv").unwrap();
/// assert_eq!(parsed.title, "Movie Title");
/// assert_eq!(parsed.year, Some(2019));
///
/// let parsed = parse_movie_name("Random File.txt").unwrap();
/// assert_eq!(parsed.title, "Random File");
/// assert_eq!(parsed.year, None);
///
/// assert!(parse_movie_name("").is_none());
/// ```
pub fn parse_movie_name(raw: &str) -> Option<ParsedMovieName> {
    first_match(&MOVIE_RULES, raw)
}

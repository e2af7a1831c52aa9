//! TV show title, season and episode extraction.

use regex::Captures;
use std::sync::LazyLock;

use crate::model::ParsedShowName;
use crate::normalize::non_empty_title;
use crate::rules::{first_match, number, Rule};

/// Episode patterns in priority order. Both require a separator between
/// the title and the marker; markers are case-insensitive.
static SHOW_RULES: LazyLock<Vec<Rule<ParsedShowName>>> = LazyLock::new(|| {
    vec![
        // Show.Name.S01E02
        Rule::new(
            "season_episode",
            r"(?i)^(.*?)[.\s_-]+s([0-9]+)e([0-9]+).*$",
            title_season_episode,
        ),
        // Show.Name.1x02
        Rule::new(
            "cross",
            r"(?i)^(.*?)[.\s_-]+([0-9]+)x([0-9]+).*$",
            title_season_episode,
        ),
    ]
});

/// Looser patterns tried only when a path is already known to be an episode.
static PATH_ONLY_RULES: LazyLock<Vec<Rule<ParsedShowName>>> = LazyLock::new(|| {
    vec![
        // Show Name Season 1 Episode 2
        Rule::new(
            "season_episode_words",
            r"(?i)^(.*?)[.\s_-]+season[.\s_-]*([0-9]+)[.\s_-]+episode[.\s_-]*([0-9]+).*$",
            title_season_episode,
        ),
        // Show.Name.102.mkv: one season digit, two episode digits
        Rule::new(
            "compact",
            r"^(.*?)[.\s_-]+([0-9])([0-9]{2})[.\s_-].*$",
            title_season_episode,
        ),
    ]
});

fn title_season_episode(captures: &Captures<'_>) -> Option<ParsedShowName> {
    let title = non_empty_title(captures.get(1)?.as_str())?;
    let season = number(captures, 2)?;
    let episode = number(captures, 3)?;
    Some(ParsedShowName {
        title,
        season: Some(season),
        episode: Some(episode),
    })
}

/// Guess a show title with season and episode from a file name.
///
/// Unlike [`parse_movie_name`](crate::parse_movie_name) there is no
/// title-only fallback: a name without an episode marker yields `None`.
///
/// ```
/// use scenescape_parser::parse_show_name;
///
/// let parsed = parse_show_name("Show.Name.2x05.mkv").unwrap();
/// assert_eq!(parsed.title, "Show Name");
/// assert_eq!(parsed.season, Some(2));
/// assert_eq!(parsed.episode, Some(5));
///
/// assert!(parse_show_name("NoPatternHere.mkv").is_none());
/// ```
pub fn parse_show_name(raw: &str) -> Option<ParsedShowName> {
    first_match(&SHOW_RULES, raw)
}

/// [`parse_show_name`], then the spelled-out and compact episode forms.
pub(crate) fn parse_episode_file_name(raw: &str) -> Option<ParsedShowName> {
    parse_show_name(raw).or_else(|| first_match(&PATH_ONLY_RULES, raw))
}

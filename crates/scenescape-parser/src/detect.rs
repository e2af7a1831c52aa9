//! Routing whole paths to the right interpreter.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use scenescape_common::paths::is_video_file;

use crate::model::{MediaKind, ParsedMedia};
use crate::movie::parse_movie_name;
use crate::show::parse_episode_file_name;

/// Any of these in a file name marks it as an episode.
static EPISODE_INDICATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)s[0-9]+e[0-9]+|[0-9]+x[0-9]+|season|episode")
        .unwrap_or_else(|e| panic!("invalid episode indicator pattern: {e}"))
});

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Guess whether a path holds a movie or an episode.
///
/// Anything that is not a video file is [`MediaKind::Unknown`].
///
/// ```
/// use scenescape_parser::{identify_media_kind, MediaKind};
///
/// assert_eq!(identify_media_kind("Show.S01E02.mkv"), MediaKind::Episode);
/// assert_eq!(identify_media_kind("Movie.2010.mp4"), MediaKind::Movie);
/// assert_eq!(identify_media_kind("cover.jpg"), MediaKind::Unknown);
/// ```
pub fn identify_media_kind<P: AsRef<Path>>(path: P) -> MediaKind {
    let path = path.as_ref();
    if !is_video_file(path) {
        return MediaKind::Unknown;
    }

    match file_name(path) {
        Some(name) if EPISODE_INDICATORS.is_match(name) => MediaKind::Episode,
        Some(_) => MediaKind::Movie,
        None => MediaKind::Unknown,
    }
}

/// Interpret the file name of a path as a movie or an episode.
///
/// Only the final component is looked at. Returns `None` for non-video
/// files and for names the chosen interpreter cannot read. Episode names
/// may also use `Season 1 Episode 2` or a compact `102` marker, which
/// [`parse_show_name`](crate::parse_show_name) alone does not accept. An
/// episode-looking name that still cannot be read is not retried as a movie.
pub fn parse_path<P: AsRef<Path>>(path: P) -> Option<ParsedMedia> {
    let path = path.as_ref();
    let name = file_name(path)?;

    match identify_media_kind(path) {
        MediaKind::Episode => parse_episode_file_name(name).map(ParsedMedia::Episode),
        MediaKind::Movie => parse_movie_name(name).map(ParsedMedia::Movie),
        MediaKind::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ParsedMovieName, ParsedShowName};

    #[test]
    fn test_identify_episode_indicators() {
        assert_eq!(identify_media_kind("a.S01E02.mkv"), MediaKind::Episode);
        assert_eq!(identify_media_kind("a.1x02.mkv"), MediaKind::Episode);
        assert_eq!(identify_media_kind("a Season 1.mkv"), MediaKind::Episode);
        assert_eq!(identify_media_kind("a EPISODE 3.mkv"), MediaKind::Episode);
    }

    #[test]
    fn test_identify_only_looks_at_file_name() {
        assert_eq!(
            identify_media_kind("/media/Season 1/Movie.2010.mkv"),
            MediaKind::Movie
        );
    }

    #[test]
    fn test_identify_non_video() {
        assert_eq!(identify_media_kind("a.S01E02.srt"), MediaKind::Unknown);
        assert_eq!(identify_media_kind("no_extension"), MediaKind::Unknown);
    }

    #[test]
    fn test_parse_path_movie() {
        assert_eq!(
            parse_path("/media/movies/Heat (1995).mkv"),
            Some(ParsedMedia::Movie(ParsedMovieName {
                title: "Heat".into(),
                year: Some(1995),
            }))
        );
    }

    #[test]
    fn test_parse_path_episode() {
        assert_eq!(
            parse_path("/media/tv/Show.Name.S02E05.720p.mkv"),
            Some(ParsedMedia::Episode(ParsedShowName {
                title: "Show Name".into(),
                season: Some(2),
                episode: Some(5),
            }))
        );
    }

    #[test]
    fn test_parse_path_spelled_out_episode() {
        assert_eq!(
            parse_path("/media/tv/Show Season 1 Episode 2.mkv"),
            Some(ParsedMedia::Episode(ParsedShowName {
                title: "Show".into(),
                season: Some(1),
                episode: Some(2),
            }))
        );
    }

    #[test]
    fn test_parse_path_compact_episode() {
        assert_eq!(
            parse_path("Show.Episode.304.mkv"),
            Some(ParsedMedia::Episode(ParsedShowName {
                title: "Show Episode".into(),
                season: Some(3),
                episode: Some(4),
            }))
        );
    }

    #[test]
    fn test_parse_path_unreadable_episode() {
        assert_eq!(parse_path("Season Finale.mkv"), None);
    }

    #[test]
    fn test_parse_path_non_video() {
        assert_eq!(parse_path("/media/movies/Heat (1995).nfo"), None);
        assert_eq!(parse_path("/"), None);
    }
}

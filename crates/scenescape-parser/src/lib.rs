//! # scenescape-parser
//!
//! Best-effort interpretation of media file names.
//!
//! Two interpreters are provided, each an ordered list of patterns where the
//! first match wins:
//!
//! - [`parse_movie_name`] extracts a title and, when present, a 4-digit year.
//!   If no year pattern matches it falls back to the bare name without its
//!   extension.
//! - [`parse_show_name`] extracts a show title with season and episode
//!   numbers from `S01E02` or `1x02` markers. There is no title-only fallback.
//!
//! ## Quick Start
//!
//! ```
//! use scenescape_parser::{parse_movie_name, parse_show_name};
//!
//! let movie = parse_movie_name("The.Matrix.1999.1080p.mkv").unwrap();
//! assert_eq!(movie.title, "The Matrix");
//! assert_eq!(movie.year, Some(1999));
//!
//! let episode = parse_show_name("Show.Name.S02E05.mkv").unwrap();
//! assert_eq!(episode.title, "Show Name");
//! assert_eq!((episode.season, episode.episode), (Some(2), Some(5)));
//! ```
//!
//! ## Whole paths
//!
//! [`parse_path`] decides between the two interpreters based on the file
//! name, and ignores anything that is not a video file:
//!
//! ```
//! use scenescape_parser::{parse_path, ParsedMedia};
//!
//! match parse_path("/media/tv/Show.Name.1x03.mkv") {
//!     Some(ParsedMedia::Episode(ep)) => assert_eq!(ep.episode, Some(3)),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! assert!(parse_path("/media/notes.txt").is_none());
//! ```

pub mod cleanup;
pub mod detect;
pub mod group;
pub mod model;

mod movie;
mod normalize;
mod rules;
mod show;

pub use cleanup::{clean_title, suggest_corrections, Suggestion};
pub use detect::{identify_media_kind, parse_path};
pub use group::group_episodes;
pub use model::{MediaKind, ParsedMedia, ParsedMovieName, ParsedShowName};
pub use movie::parse_movie_name;
pub use normalize::normalize_title;
pub use show::parse_show_name;

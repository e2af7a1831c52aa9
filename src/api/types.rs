//! Wire types for the library server.
//!
//! The server has shipped several payload shapes over time, so most fields
//! are optional and a few accept alternate names.

use scenescape_common::format::bytes_to_gb_string;
use serde::{Deserialize, Deserializer, Serialize};

/// A genre is sent either as a bare name or as a full record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Genre {
    Name(String),
    Record {
        #[serde(default)]
        id: Option<u64>,
        name: String,
    },
}

impl Genre {
    pub fn name(&self) -> &str {
        match self {
            Genre::Name(name) => name,
            Genre::Record { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    /// Alternate spelling of `title`; older servers send either or both.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, rename = "year")]
    year_field: Option<u32>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Alternate spelling of `vote_average`.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub local_path: Option<String>,
    #[serde(default)]
    pub tmdb_id: Option<u64>,
}

impl Movie {
    /// First non-blank of `title`, `name` and `original_title`.
    pub fn display_title(&self) -> &str {
        first_present(&[&self.title, &self.name, &self.original_title]).unwrap_or("Untitled")
    }

    /// `vote_average`, else `rating`.
    pub fn rating(&self) -> Option<f64> {
        self.vote_average.or(self.rating)
    }

    /// Explicit `year`, else the leading year of `release_date`.
    pub fn year(&self) -> Option<u32> {
        self.year_field
            .or_else(|| leading_year(self.release_date.as_deref()?))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TvShow {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub last_air_date: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Alternate spelling of `vote_average`.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub local_path: Option<String>,
    #[serde(default)]
    pub tmdb_id: Option<u64>,
}

impl TvShow {
    /// First non-blank of `title`, `name`, `original_title` and `original_name`.
    pub fn display_title(&self) -> &str {
        first_present(&[
            &self.title,
            &self.name,
            &self.original_title,
            &self.original_name,
        ])
        .unwrap_or("Untitled")
    }

    /// `vote_average`, else `rating`.
    pub fn rating(&self) -> Option<f64> {
        self.vote_average.or(self.rating)
    }

    pub fn first_air_year(&self) -> Option<u32> {
        leading_year(self.first_air_date.as_deref()?)
    }
}

fn first_present<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .filter_map(Option::as_deref)
        .find(|value| !value.trim().is_empty())
}

fn leading_year(date: &str) -> Option<u32> {
    let year = date.get(..4)?;
    if year.bytes().all(|b| b.is_ascii_digit()) {
        year.parse().ok()
    } else {
        None
    }
}

/// A page of results.
///
/// Accepts both a bare JSON array and `{ "results": [...], ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u64>,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageWire<T> {
    Bare(Vec<T>),
    Wrapped {
        results: Vec<T>,
        #[serde(default)]
        page: Option<u32>,
        #[serde(default)]
        total_pages: Option<u32>,
        #[serde(default)]
        total_results: Option<u64>,
    },
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PageWire::deserialize(deserializer)? {
            PageWire::Bare(results) => Page {
                results,
                page: None,
                total_pages: None,
                total_results: None,
            },
            PageWire::Wrapped {
                results,
                page,
                total_pages,
                total_results,
            } => Page {
                results,
                page,
                total_pages,
                total_results,
            },
        })
    }
}

/// Library totals from `GET /api/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LibraryStats {
    #[serde(default)]
    pub total_movies: u64,
    #[serde(default)]
    pub total_tv_shows: u64,
    #[serde(default)]
    pub total_episodes: u64,
    /// Bytes.
    #[serde(default)]
    pub total_size: u64,
}

impl LibraryStats {
    /// `total_size` as a gigabyte string, e.g. `"1.50 GB"`.
    pub fn storage_used(&self) -> String {
        bytes_to_gb_string(self.total_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// Filters for `GET /api/movies`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovieQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Filters for `GET /api/tv-shows`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShowQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Result of `POST /api/scan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanStarted {
    pub task_id: String,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScanRequest<'a> {
    pub path: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScanStartResponse {
    #[serde(default)]
    pub data: Option<TaskIdPayload>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskIdPayload {
    #[serde(default)]
    pub task_id: Option<String>,
}

impl ScanStartResponse {
    /// `data.task_id`, falling back to a top-level `task_id`. Blank ids count as absent.
    pub fn into_started(self) -> Option<ScanStarted> {
        let task_id = self
            .data
            .and_then(|data| data.task_id)
            .or(self.task_id)
            .filter(|id| !id.trim().is_empty())?;
        Some(ScanStarted {
            task_id,
            message: self.message,
        })
    }
}

/// Body of an error response; only `message` (or `detail`) is looked at.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or_else(|| match self.detail? {
            serde_json::Value::String(detail) => Some(detail),
            _ => None,
        })
    }
}

//! Client for the library server's REST API.

mod client;
mod error;
mod types;

pub use client::HttpLibraryApi;
pub use error::ApiError;
pub use types::{
    Genre, HealthStatus, LibraryStats, Movie, MovieQuery, Page, ScanStarted, ShowQuery, TvShow,
};

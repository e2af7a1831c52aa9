//! Scenescape-Common: Shared types and utilities.
//!
//! This crate provides common functionality used across scenescape:
//!
//! - **Error Handling**: Common error type and result alias
//! - **Path Utilities**: Video file detection by extension
//! - **Formatting**: Human-readable byte sizes
//!
//! # Examples
//!
//! ```
//! use scenescape_common::{Error, Result};
//! use scenescape_common::format::bytes_to_gb_string;
//! use scenescape_common::paths::is_video_file;
//! use std::path::Path;
//!
//! assert!(is_video_file(Path::new("movie.mkv")));
//! assert_eq!(bytes_to_gb_string(1024 * 1024 * 1024), "1.00 GB");
//!
//! fn example() -> Result<()> {
//!     Err(Error::invalid_input("empty path"))
//! }
//! ```

pub mod error;
pub mod format;
pub mod paths;

pub use error::{Error, Result};

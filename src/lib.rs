//! Scenescape - media library client
//!
//! Talks to a media library server, starts folder scans and follows their
//! progress, and interprets media filenames locally.

pub mod api;
pub mod config;
pub mod library;
pub mod scan;

//! Local classification of media files.
//!
//! Walks a file or directory, keeps video files within the configured size
//! limit, and runs each through the filename interpreter.

use std::path::{Path, PathBuf};

use scenescape_common::paths::{is_hidden, is_video_file};
use scenescape_parser::{parse_path, suggest_corrections, ParsedMedia, Suggestion};
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::MediaConfig;

/// A video file and what its name says about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedFile {
    pub path: PathBuf,
    pub size: u64,
    /// `None` when the name matched neither interpreter.
    pub media: Option<ParsedMedia>,
    #[serde(serialize_with = "serialize_suggestions")]
    pub suggestions: Vec<Suggestion>,
}

fn serialize_suggestions<S: serde::Serializer>(
    suggestions: &[Suggestion],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(suggestions.iter().map(ToString::to_string))
}

/// Classify `root`, which may be a single file or a directory.
///
/// Files sorted by path. Unreadable directory entries are logged and skipped.
pub fn classify_path(
    root: &Path,
    config: &MediaConfig,
    current_year: u32,
) -> scenescape_common::Result<Vec<ClassifiedFile>> {
    if !root.exists() {
        return Err(scenescape_common::Error::not_found(
            root.display().to_string(),
        ));
    }

    info!("Classifying media under {:?}", root);
    let max_size = config.max_file_size_bytes();
    let mut walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
    if !config.recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    let entries = walker
        .into_iter()
        .filter_entry(|entry| keep_entry(entry, config.skip_hidden_files));
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_video_file(entry.path()) {
            continue;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if size > max_size {
            debug!("Skipping {:?}: {} bytes exceeds limit", entry.path(), size);
            continue;
        }

        files.push(classify_file(entry.into_path(), size, current_year));
    }

    info!("Classified {} media files", files.len());
    Ok(files)
}

fn keep_entry(entry: &DirEntry, skip_hidden: bool) -> bool {
    // The root itself is always walked, even if its name starts with a dot.
    entry.depth() == 0 || !(skip_hidden && is_hidden(entry.path()))
}

fn classify_file(path: PathBuf, size: u64, current_year: u32) -> ClassifiedFile {
    let media = parse_path(&path);
    let suggestions = media
        .as_ref()
        .map(|media| suggest_corrections(media, current_year))
        .unwrap_or_default();
    ClassifiedFile {
        path,
        size,
        media,
        suggestions,
    }
}

//! Remote scan progress tracking.

mod tracker;
mod types;

pub use tracker::{ScanStatusSource, ScanTracker, TrackerConfig};
pub use types::{
    ScanHistoryEntry, ScanNotice, ScanSnapshot, ScanStatus, ScanTask, SnapshotError, TrackerPhase,
    TrackerState,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote scan task status.
///
/// The library server has used several labels over time; the aliases map
/// them onto the four states the tracker distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    #[serde(alias = "idle")]
    Pending,
    #[serde(alias = "scanning")]
    Running,
    Completed,
    #[serde(alias = "error", alias = "cancelled")]
    Failed,
}

impl ScanStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ScanStatus::Completed | ScanStatus::Failed)
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScanStatus::Pending => "pending",
            ScanStatus::Running => "running",
            ScanStatus::Completed => "completed",
            ScanStatus::Failed => "failed",
        };
        f.pad(label)
    }
}

/// Local mirror of a remote scan task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanTask {
    pub task_id: String,
    pub status: ScanStatus,
    /// Always within `0.0..=100.0`.
    pub progress_percent: f64,
    pub total_files: u64,
    /// Never above `total_files` once that is non-zero.
    pub processed_files: u64,
    pub current_file: Option<String>,
    /// Only set when `status` is [`ScanStatus::Failed`].
    pub error_message: Option<String>,
}

impl ScanTask {
    /// The task as it stands right after the server handed out its id.
    pub fn pending(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            status: ScanStatus::Pending,
            progress_percent: 0.0,
            total_files: 0,
            processed_files: 0,
            current_file: None,
            error_message: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// A status snapshot as returned by `GET /api/scan/{task_id}`.
///
/// Only `status` is required; everything else falls back to zero or absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanSnapshot {
    pub status: ScanStatus,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub current_file: Option<String>,
    #[serde(default)]
    pub total_files: Option<u64>,
    #[serde(default)]
    pub processed_files: Option<u64>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A snapshot that decoded but cannot describe a valid task.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("processed_files ({processed}) exceeds total_files ({total})")]
    ProcessedExceedsTotal { processed: u64, total: u64 },

    #[error("progress is not a finite number")]
    InvalidProgress,
}

impl ScanSnapshot {
    /// Convert into a [`ScanTask`] for `task_id`, enforcing task invariants.
    ///
    /// Progress is clamped into `0..=100`. For failed tasks the generic
    /// `message` field stands in for a missing `error_message`; for any other
    /// status both are dropped.
    pub fn into_task(self, task_id: impl Into<String>) -> Result<ScanTask, SnapshotError> {
        let progress = self.progress.unwrap_or(0.0);
        if !progress.is_finite() {
            return Err(SnapshotError::InvalidProgress);
        }

        let total = self.total_files.unwrap_or(0);
        let processed = self.processed_files.unwrap_or(0);
        if total > 0 && processed > total {
            return Err(SnapshotError::ProcessedExceedsTotal { processed, total });
        }

        let error_message = match self.status {
            ScanStatus::Failed => self.error_message.or(self.message),
            _ => None,
        };

        Ok(ScanTask {
            task_id: task_id.into(),
            status: self.status,
            progress_percent: progress.clamp(0.0, 100.0),
            total_files: total,
            processed_files: processed,
            current_file: self.current_file,
            error_message,
        })
    }
}

/// Tracker phase, including the pre-submission `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerPhase {
    Idle,
    Pending,
    Running,
    Completed,
    Failed,
}

impl From<ScanStatus> for TrackerPhase {
    fn from(status: ScanStatus) -> Self {
        match status {
            ScanStatus::Pending => TrackerPhase::Pending,
            ScanStatus::Running => TrackerPhase::Running,
            ScanStatus::Completed => TrackerPhase::Completed,
            ScanStatus::Failed => TrackerPhase::Failed,
        }
    }
}

/// Message published once a task reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ScanNotice {
    Completed { processed_files: u64 },
    Failed { message: String },
}

impl ScanNotice {
    /// Build the notice for a terminal task; `None` while still in flight.
    pub fn for_task(task: &ScanTask) -> Option<Self> {
        match task.status {
            ScanStatus::Completed => Some(ScanNotice::Completed {
                processed_files: task.processed_files,
            }),
            ScanStatus::Failed => Some(ScanNotice::Failed {
                message: task
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "scan failed".to_string()),
            }),
            ScanStatus::Pending | ScanStatus::Running => None,
        }
    }
}

impl fmt::Display for ScanNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanNotice::Completed { processed_files } => {
                write!(f, "Scan completed, processed {processed_files} files")
            }
            ScanNotice::Failed { message } => write!(f, "Scan failed: {message}"),
        }
    }
}

/// Observable tracker state, published through a `watch` channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    pub(crate) session: u64,
    task: Option<ScanTask>,
    notice: Option<ScanNotice>,
}

impl TrackerState {
    pub(crate) fn started(session: u64, task_id: &str) -> Self {
        Self {
            session,
            task: Some(ScanTask::pending(task_id)),
            notice: None,
        }
    }

    pub(crate) fn apply(&mut self, task: ScanTask) {
        self.notice = ScanNotice::for_task(&task);
        self.task = Some(task);
    }

    /// Latest snapshot, `None` before the first `start_tracking`.
    pub fn task(&self) -> Option<&ScanTask> {
        self.task.as_ref()
    }

    /// Terminal notice, set once the task completed or failed.
    pub fn notice(&self) -> Option<&ScanNotice> {
        self.notice.as_ref()
    }

    pub fn phase(&self) -> TrackerPhase {
        self.task
            .as_ref()
            .map_or(TrackerPhase::Idle, |task| task.status.into())
    }

    pub fn is_terminal(&self) -> bool {
        self.task.as_ref().is_some_and(ScanTask::is_terminal)
    }
}

/// A finished task kept for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanHistoryEntry {
    pub task: ScanTask,
    pub finished_at: DateTime<Utc>,
}

//! Polling state machine that follows one remote scan task.
//!
//! A [`ScanTracker`] owns at most one polling session. Each session is a
//! tokio task that fires a status request every poll interval without
//! waiting for earlier ones, applies responses in the order they complete,
//! and stops by itself once the task reaches a terminal status.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::types::{ScanHistoryEntry, ScanTask, TrackerState};
use crate::api::ApiError;
use crate::config::ScanConfig;

const MAX_HISTORY_SIZE: usize = 100;

type StatusRequest = BoxFuture<'static, (u64, Result<ScanTask, ApiError>)>;

/// Anything that can report the current status of a scan task.
#[async_trait]
pub trait ScanStatusSource: Send + Sync {
    async fn scan_status(&self, task_id: &str) -> Result<ScanTask, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    pub poll_interval: Duration,
    /// Drop a response when a response to a later request was already applied.
    pub discard_stale_responses: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            discard_stale_responses: false,
        }
    }
}

impl From<&ScanConfig> for TrackerConfig {
    fn from(config: &ScanConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            discard_stale_responses: config.discard_stale_responses,
        }
    }
}

struct Session {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Tracks a single scan task at a time. Starting a new task cancels the
/// previous session; dropping the tracker cancels the active one.
///
/// Must be used from within a tokio runtime.
pub struct ScanTracker {
    source: Arc<dyn ScanStatusSource>,
    config: TrackerConfig,
    state: Arc<watch::Sender<TrackerState>>,
    history: Arc<RwLock<VecDeque<ScanHistoryEntry>>>,
    session: Option<Session>,
    generation: u64,
}

impl ScanTracker {
    pub fn new(source: Arc<dyn ScanStatusSource>, config: TrackerConfig) -> Self {
        let (state, _) = watch::channel(TrackerState::default());
        Self {
            source,
            config,
            state: Arc::new(state),
            history: Arc::new(RwLock::new(VecDeque::new())),
            session: None,
            generation: 0,
        }
    }

    /// Begin polling `task_id`, replacing any session in progress.
    ///
    /// The state resets to `Pending` for the new id immediately; the first
    /// status request goes out one poll interval later. A blank id or a zero
    /// poll interval is rejected and leaves any running session untouched.
    pub fn start_tracking(&mut self, task_id: impl Into<String>) -> scenescape_common::Result<()> {
        let task_id = task_id.into();
        if task_id.trim().is_empty() {
            return Err(scenescape_common::Error::invalid_input("task id is empty"));
        }
        if self.config.poll_interval.is_zero() {
            return Err(scenescape_common::Error::invalid_input(
                "poll interval must be greater than zero",
            ));
        }

        self.stop_tracking();
        self.generation += 1;
        self.state
            .send_replace(TrackerState::started(self.generation, &task_id));

        let cancel = CancellationToken::new();
        let poll = PollLoop {
            task_id,
            session: self.generation,
            source: Arc::clone(&self.source),
            config: self.config,
            state: Arc::clone(&self.state),
            history: Arc::clone(&self.history),
            cancel: cancel.clone(),
        };
        info!(task_id = %poll.task_id, interval_ms = self.config.poll_interval.as_millis() as u64, "Tracking scan");
        let handle = tokio::spawn(poll.run());

        self.session = Some(Session { cancel, handle });
        Ok(())
    }

    /// Stop polling. Safe to call any number of times; the last published
    /// state is left as it was.
    pub fn stop_tracking(&mut self) {
        if let Some(session) = self.session.take() {
            session.cancel.cancel();
            debug!(session = self.generation, "Scan tracking stopped");
        }
    }

    /// Whether a polling session is still running.
    pub fn is_tracking(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| !session.handle.is_finished())
    }

    pub fn subscribe(&self) -> watch::Receiver<TrackerState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> TrackerState {
        self.state.borrow().clone()
    }

    /// Finished tasks, most recent first.
    pub fn history(&self) -> Vec<ScanHistoryEntry> {
        self.history.read().iter().cloned().collect()
    }
}

impl Drop for ScanTracker {
    fn drop(&mut self) {
        self.stop_tracking();
    }
}

struct PollLoop {
    task_id: String,
    session: u64,
    source: Arc<dyn ScanStatusSource>,
    config: TrackerConfig,
    state: Arc<watch::Sender<TrackerState>>,
    history: Arc<RwLock<VecDeque<ScanHistoryEntry>>>,
    cancel: CancellationToken,
}

impl PollLoop {
    async fn run(self) {
        let period = self.config.poll_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut in_flight: FuturesUnordered<StatusRequest> = FuturesUnordered::new();
        let mut next_seq: u64 = 0;
        let mut newest_applied: Option<u64> = None;

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    debug!(task_id = %self.task_id, dropped = in_flight.len(), "Poll loop cancelled");
                    break;
                }

                Some((seq, result)) = in_flight.next(), if !in_flight.is_empty() => {
                    if self.handle_response(seq, result, &mut newest_applied) {
                        break;
                    }
                }

                _ = ticker.tick() => {
                    let seq = next_seq;
                    next_seq += 1;
                    let source = Arc::clone(&self.source);
                    let task_id = self.task_id.clone();
                    in_flight.push(async move {
                        let result = source.scan_status(&task_id).await;
                        (seq, result)
                    }
                    .boxed());
                }
            }
        }
    }

    /// Apply one response. Returns true once the task is terminal.
    fn handle_response(
        &self,
        seq: u64,
        result: Result<ScanTask, ApiError>,
        newest_applied: &mut Option<u64>,
    ) -> bool {
        let task = match result {
            Ok(task) => task,
            Err(e) => {
                warn!(task_id = %self.task_id, error = %e, "Scan status request failed");
                return false;
            }
        };

        if self.config.discard_stale_responses {
            if newest_applied.is_some_and(|newest| seq < newest) {
                debug!(task_id = %self.task_id, seq, "Discarding stale status response");
                return false;
            }
            *newest_applied = Some(seq);
        }

        let terminal = task.is_terminal();
        let applied = self.state.send_if_modified(|state| {
            if self.cancel.is_cancelled() || state.session != self.session {
                return false;
            }
            state.apply(task.clone());
            true
        });

        if !applied {
            return true;
        }

        debug!(
            task_id = %self.task_id,
            status = %task.status,
            progress = task.progress_percent,
            processed = task.processed_files,
            total = task.total_files,
            "Scan status updated"
        );

        if terminal {
            match &task.error_message {
                Some(message) => warn!(task_id = %self.task_id, %message, "Scan failed"),
                None => info!(task_id = %self.task_id, status = %task.status, processed = task.processed_files, "Scan finished"),
            }
            self.archive(task);
        }
        terminal
    }

    fn archive(&self, task: ScanTask) {
        let mut history = self.history.write();
        history.push_front(ScanHistoryEntry {
            task,
            finished_at: Utc::now(),
        });
        while history.len() > MAX_HISTORY_SIZE {
            history.pop_back();
        }
    }
}

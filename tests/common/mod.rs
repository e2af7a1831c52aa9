//! Shared test harness for integration tests.
//!
//! Provides [`ScriptedSource`], a [`ScanStatusSource`] that replays a fixed
//! list of responses, each optionally delayed, and records every request.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use scenescape::api::ApiError;
use scenescape::scan::{ScanStatus, ScanStatusSource, ScanTask};

struct Step {
    delay: Duration,
    result: Result<ScanTask, ApiError>,
}

/// Replays scripted status responses in request order.
///
/// Once the script runs out every request fails with a transport error.
#[derive(Default)]
pub struct ScriptedSource {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(self: &Arc<Self>, task: ScanTask) -> &Arc<Self> {
        self.push(Duration::ZERO, Ok(task))
    }

    pub fn respond_after(self: &Arc<Self>, delay: Duration, task: ScanTask) -> &Arc<Self> {
        self.push(delay, Ok(task))
    }

    pub fn fail(self: &Arc<Self>, error: ApiError) -> &Arc<Self> {
        self.push(Duration::ZERO, Err(error))
    }

    fn push(self: &Arc<Self>, delay: Duration, result: Result<ScanTask, ApiError>) -> &Arc<Self> {
        self.steps.lock().push_back(Step { delay, result });
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl ScanStatusSource for ScriptedSource {
    async fn scan_status(&self, task_id: &str) -> Result<ScanTask, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().push(task_id.to_string());
        let step = self.steps.lock().pop_front();
        match step {
            Some(step) => {
                if !step.delay.is_zero() {
                    tokio::time::sleep(step.delay).await;
                }
                step.result
            }
            None => Err(ApiError::Transport("script exhausted".into())),
        }
    }
}

/// A task snapshot with the given status and progress.
pub fn task(task_id: &str, status: ScanStatus, progress: f64) -> ScanTask {
    let mut task = ScanTask::pending(task_id);
    task.status = status;
    task.progress_percent = progress;
    task
}

pub fn running(task_id: &str, progress: f64) -> ScanTask {
    task(task_id, ScanStatus::Running, progress)
}

pub fn completed(task_id: &str, processed: u64) -> ScanTask {
    let mut task = task(task_id, ScanStatus::Completed, 100.0);
    task.total_files = processed;
    task.processed_files = processed;
    task
}

pub fn failed(task_id: &str, message: Option<&str>) -> ScanTask {
    let mut task = task(task_id, ScanStatus::Failed, 40.0);
    task.error_message = message.map(str::to_string);
    task
}

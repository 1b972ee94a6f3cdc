use super::error::BatchError;
use super::model::{BatchJobStatus, BatchProgress, BatchReport, BatchState};
use super::progress::{CancellationFlag, ProgressSink};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

/// Finished jobs kept for status queries; older ones are evicted on insert
pub const MAX_FINISHED_JOBS: usize = 32;

struct JobEntry {
    status: BatchJobStatus,
    cancel: CancellationFlag,
}

/// In-memory record of every batch started by this process
#[derive(Default)]
pub struct BatchJobRegistry {
    jobs: RwLock<HashMap<Uuid, JobEntry>>,
}

impl BatchJobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, status: BatchJobStatus) -> CancellationFlag {
        let cancel = CancellationFlag::new();
        let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        evict_finished(&mut jobs, MAX_FINISHED_JOBS);
        jobs.insert(
            status.job_id,
            JobEntry {
                status,
                cancel: cancel.clone(),
            },
        );
        cancel
    }

    pub fn get(&self, job_id: Uuid) -> Option<BatchJobStatus> {
        let jobs = self.jobs.read().unwrap_or_else(PoisonError::into_inner);
        jobs.get(&job_id).map(|entry| entry.status.clone())
    }

    pub fn update_progress(&self, job_id: Uuid, progress: BatchProgress) {
        self.with_running(job_id, |status| {
            status.percent = progress.percent();
            status.progress = progress;
        });
    }

    pub fn complete(&self, job_id: Uuid, report: &BatchReport) {
        self.with_running(job_id, |status| {
            status.state = BatchState::Completed;
            status.percent = 100;
            status.output_path = Some(report.output_path.clone());
            status.audio_size_bytes = Some(report.audio_size_bytes);
            status.finished_at = Some(Utc::now());
        });
    }

    pub fn fail(&self, job_id: Uuid, error: &BatchError) {
        self.with_running(job_id, |status| {
            status.state = match error {
                BatchError::Cancelled { .. } => BatchState::Cancelled,
                _ => BatchState::Failed,
            };
            status.output_path = None;
            status.error = Some(error.to_string());
            status.failed_segment = error.failed_segment();
            status.finished_at = Some(Utc::now());
        });
    }

    /// Flags a running job for cancellation; finished jobs are returned as-is
    pub fn request_cancel(&self, job_id: Uuid) -> Result<BatchJobStatus, BatchError> {
        let jobs = self.jobs.read().unwrap_or_else(PoisonError::into_inner);
        let entry = jobs.get(&job_id).ok_or(BatchError::NotFound)?;
        if !entry.status.state.is_terminal() {
            entry.cancel.cancel();
        }
        Ok(entry.status.clone())
    }

    /// Sink that writes progress into this registry
    pub fn progress_sink(&self, job_id: Uuid) -> RegistryProgress<'_> {
        RegistryProgress {
            registry: self,
            job_id,
        }
    }

    fn with_running(&self, job_id: Uuid, update: impl FnOnce(&mut BatchJobStatus)) {
        let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = jobs.get_mut(&job_id) {
            if !entry.status.state.is_terminal() {
                update(&mut entry.status);
            }
        }
    }
}

fn evict_finished(jobs: &mut HashMap<Uuid, JobEntry>, keep: usize) {
    let mut finished: Vec<(Uuid, _)> = jobs
        .iter()
        .filter_map(|(id, entry)| entry.status.finished_at.map(|at| (*id, at)))
        .collect();
    if finished.len() <= keep {
        return;
    }

    finished.sort_by(|a, b| b.1.cmp(&a.1));
    for (job_id, _) in finished.into_iter().skip(keep) {
        jobs.remove(&job_id);
    }
}

pub struct RegistryProgress<'a> {
    registry: &'a BatchJobRegistry,
    job_id: Uuid,
}

impl ProgressSink for RegistryProgress<'_> {
    fn report(&self, progress: BatchProgress) {
        self.registry.update_progress(self.job_id, progress);
    }
}

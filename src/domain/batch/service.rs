use super::error::BatchError;
use super::model::{BatchJob, BatchJobStatus, BatchProgress, BatchRequest, BatchStarted, BatchState};
use super::orchestrator::BatchOrchestrator;
use super::registry::BatchJobRegistry;
use crate::domain::tts::service::timestamped_file_name;
use crate::domain::tts::split_into_segments;
use crate::domain::voice::resolve_voice;
use crate::infrastructure::repositories::{FileRepository, VoiceSampleRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};
use uuid::Uuid;

pub struct BatchService {
    orchestrator: Arc<BatchOrchestrator>,
    registry: Arc<BatchJobRegistry>,
    voice_repo: Arc<VoiceSampleRepository>,
    file_repo: Arc<FileRepository>,
    output_dir: PathBuf,
    default_segment_size: usize,
    // one permit: a single batch at a time
    job_slot: Arc<Semaphore>,
}

impl BatchService {
    pub fn new(
        orchestrator: Arc<BatchOrchestrator>,
        voice_repo: Arc<VoiceSampleRepository>,
        file_repo: Arc<FileRepository>,
        output_dir: PathBuf,
        default_segment_size: usize,
    ) -> Self {
        Self {
            orchestrator,
            registry: Arc::new(BatchJobRegistry::new()),
            voice_repo,
            file_repo,
            output_dir,
            default_segment_size,
            job_slot: Arc::new(Semaphore::new(1)),
        }
    }
}

#[async_trait]
pub trait BatchServiceApi: Send + Sync {
    /// Validate, segment and queue a batch; synthesis runs in the background
    async fn start_batch(&self, request: BatchRequest) -> Result<BatchStarted, BatchError>;

    fn job_status(&self, job_id: Uuid) -> Result<BatchJobStatus, BatchError>;

    /// Stops the job before its next segment
    fn cancel_batch(&self, job_id: Uuid) -> Result<BatchJobStatus, BatchError>;
}

#[async_trait]
impl BatchServiceApi for BatchService {
    async fn start_batch(&self, request: BatchRequest) -> Result<BatchStarted, BatchError> {
        if !(request.speed.is_finite() && request.speed > 0.0) {
            return Err(BatchError::Invalid(
                "Speed must be a positive number".to_string(),
            ));
        }
        let segment_size = request.segment_size.unwrap_or(self.default_segment_size);
        if segment_size == 0 {
            return Err(BatchError::Invalid(
                "Segment size must be greater than zero".to_string(),
            ));
        }
        let output_name = output_file_name(&request)?;

        let permit = self
            .job_slot
            .clone()
            .try_acquire_owned()
            .map_err(|_| BatchError::Busy)?;

        let text = self.load_text(&request).await?;
        let segments = split_into_segments(&text, segment_size);
        if segments.is_empty() {
            return Err(BatchError::Invalid(
                "Text contains nothing to synthesize".to_string(),
            ));
        }
        let voice = resolve_voice(&self.voice_repo, &request.voice).await?;

        let job = BatchJob {
            job_id: Uuid::new_v4(),
            segments,
            voice,
            speed: request.speed,
            version: request.version,
            output_path: self.output_dir.join(output_name),
        };
        let segment_count = job.segments.len();

        let cancel = self.registry.insert(BatchJobStatus {
            job_id: job.job_id,
            state: BatchState::Running,
            voice: job.voice.label(),
            segment_count,
            progress: BatchProgress::new(0, segment_count + 1, "Queued"),
            percent: 0,
            output_path: None,
            audio_size_bytes: None,
            error: None,
            failed_segment: None,
            started_at: Utc::now(),
            finished_at: None,
        });

        info!(
            job_id = %job.job_id,
            segments = segment_count,
            segment_size,
            voice = %job.voice.label(),
            "Batch job accepted"
        );

        let started = BatchStarted {
            job_id: job.job_id,
            segment_count,
            output_path: job.output_path.clone(),
        };

        let orchestrator = self.orchestrator.clone();
        let registry = self.registry.clone();
        tokio::spawn(async move {
            let sink = registry.progress_sink(job.job_id);
            let result = orchestrator.run(&job, &sink, &cancel).await;
            // free the slot before the terminal state becomes visible
            drop(permit);
            match result {
                Ok(report) => registry.complete(job.job_id, &report),
                Err(e) => registry.fail(job.job_id, &e),
            }
        });

        Ok(started)
    }

    fn job_status(&self, job_id: Uuid) -> Result<BatchJobStatus, BatchError> {
        self.registry.get(job_id).ok_or(BatchError::NotFound)
    }

    fn cancel_batch(&self, job_id: Uuid) -> Result<BatchJobStatus, BatchError> {
        let status = self.registry.request_cancel(job_id)?;
        if status.state.is_terminal() {
            warn!(job_id = %job_id, state = ?status.state, "Cancel requested for finished job");
        } else {
            info!(job_id = %job_id, "Batch cancellation requested");
        }
        Ok(status)
    }
}

impl BatchService {
    async fn load_text(&self, request: &BatchRequest) -> Result<String, BatchError> {
        match (&request.text, &request.file_path) {
            (Some(text), None) => Ok(text.clone()),
            (None, Some(path)) => match self.file_repo.read_text(path).await {
                Ok(decoded) => Ok(decoded.content),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(BatchError::Invalid(
                    format!("Text file not found: {}", path.display()),
                )),
                Err(e) => Err(e.into()),
            },
            _ => Err(BatchError::Invalid(
                "Provide exactly one of text or file_path".to_string(),
            )),
        }
    }
}

/// Final file name: explicit name, else the text file's stem, else a timestamp
fn output_file_name(request: &BatchRequest) -> Result<String, BatchError> {
    if let Some(name) = &request.output_name {
        let name = name.trim();
        let stem = name.strip_suffix(".wav").unwrap_or(name);
        if stem.is_empty() || stem == "." || stem == ".." || stem.contains(['/', '\\']) {
            return Err(BatchError::Invalid(format!("Invalid output name: {}", name)));
        }
        return Ok(format!("{}.wav", stem));
    }

    let file_stem = request
        .file_path
        .as_ref()
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty());

    Ok(match file_stem {
        Some(stem) => format!("{}.wav", stem),
        None => timestamped_file_name("batch"),
    })
}

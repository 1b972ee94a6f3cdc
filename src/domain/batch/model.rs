use crate::domain::tts::ApiVersion;
use crate::domain::voice::VoiceSelector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

fn default_speed() -> f32 {
    1.0
}

/// Request for POST /api/batch
///
/// Exactly one of `text` and `file_path` must be given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    /// Built-in voice name or `custom:{fileName}`
    pub voice: String,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_size: Option<usize>,
    #[serde(default)]
    pub version: ApiVersion,
    /// Output file stem; defaults to the text file's stem
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_name: Option<String>,
}

/// Response for POST /api/batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStarted {
    pub job_id: Uuid,
    pub segment_count: usize,
    pub output_path: PathBuf,
}

/// Everything the orchestrator needs to run one batch
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub job_id: Uuid,
    pub segments: Vec<String>,
    pub voice: VoiceSelector,
    pub speed: f32,
    pub version: ApiVersion,
    pub output_path: PathBuf,
}

impl BatchJob {
    /// Stem shared by the final file and the intermediates
    pub fn output_stem(&self) -> String {
        self.output_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("batch")
            .to_string()
    }
}

/// Outcome of a completed batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub output_path: PathBuf,
    pub segment_count: usize,
    pub audio_size_bytes: usize,
    pub reference_audio: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl BatchProgress {
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.current.min(self.total) * 100) / self.total) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchState {
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl BatchState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BatchState::Running)
    }
}

/// Response for GET /api/batch/:job_id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJobStatus {
    pub job_id: Uuid,
    pub state: BatchState,
    pub voice: String,
    pub segment_count: usize,
    pub progress: BatchProgress,
    pub percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_size_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 1-indexed segment that aborted the batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_segment: Option<usize>,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

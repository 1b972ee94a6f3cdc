use crate::domain::voice::VoiceResolveError;
use crate::error::AppError;
use crate::infrastructure::repositories::SynthesisError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("another batch job is already running")]
    Busy,
    #[error("batch job not found")]
    NotFound,
    #[error("file error: {0}")]
    Io(String),
    /// `segment` is 1-indexed
    #[error("segment {segment} synthesis failed: {source}")]
    Segment {
        segment: usize,
        source: SynthesisError,
    },
    #[error("segment {segment} write to {} failed: {source}", .path.display())]
    SegmentWrite {
        segment: usize,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("batch cancelled before segment {segment}")]
    Cancelled { segment: usize },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BatchError {
    pub fn failed_segment(&self) -> Option<usize> {
        match self {
            BatchError::Segment { segment, .. } | BatchError::SegmentWrite { segment, .. } => {
                Some(*segment)
            }
            _ => None,
        }
    }
}

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        BatchError::Io(err.to_string())
    }
}

impl From<VoiceResolveError> for BatchError {
    fn from(err: VoiceResolveError) -> Self {
        match err {
            VoiceResolveError::Invalid(msg) => BatchError::Invalid(msg),
            VoiceResolveError::Io(e) => BatchError::Io(e.to_string()),
        }
    }
}

impl From<BatchError> for AppError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::Invalid(msg) => AppError::BadRequest(msg),
            BatchError::Busy => AppError::Conflict(err.to_string()),
            BatchError::NotFound => AppError::NotFound("Batch job not found".to_string()),
            BatchError::Io(msg) => AppError::FileIo(msg),
            BatchError::Segment { .. } => AppError::ExternalService(err.to_string()),
            BatchError::SegmentWrite { .. } => AppError::FileIo(err.to_string()),
            BatchError::Cancelled { .. } => AppError::Conflict(err.to_string()),
            BatchError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}

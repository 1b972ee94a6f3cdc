use crate::domain::voice::VoiceResolveError;
use crate::error::AppError;
use crate::infrastructure::repositories::SynthesisError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("text too long: {0}")]
    TooLong(String),
    #[error("synthesis failed: {0}")]
    Dependency(String),
    #[error("file error: {0}")]
    Io(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<SynthesisError> for TtsServiceError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::Io(msg) => TtsServiceError::Io(msg),
            other => TtsServiceError::Dependency(other.to_string()),
        }
    }
}

impl From<VoiceResolveError> for TtsServiceError {
    fn from(err: VoiceResolveError) -> Self {
        match err {
            VoiceResolveError::Invalid(msg) => TtsServiceError::Invalid(msg),
            VoiceResolveError::Io(e) => TtsServiceError::Io(e.to_string()),
        }
    }
}

impl From<std::io::Error> for TtsServiceError {
    fn from(err: std::io::Error) -> Self {
        TtsServiceError::Io(err.to_string())
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TtsServiceError::TooLong(msg) => AppError::PayloadTooLarge(msg),
            TtsServiceError::Dependency(msg) => AppError::ExternalService(msg),
            TtsServiceError::Io(msg) => AppError::FileIo(msg),
            TtsServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}

use crate::domain::tts::SynthesisRequest;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Failure of a call to the TTS backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthesisError {
    /// Network unreachable, DNS, connection reset; message passed through verbatim
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response from the backend
    #[error("HTTP {status}: {status_text}{}", format_body(.body))]
    Http {
        status: u16,
        status_text: String,
        body: Option<String>,
    },

    /// Reading the reference sample failed
    #[error("{0}")]
    Io(String),
}

fn format_body(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" - {}", b))
        .unwrap_or_default()
}

impl From<reqwest::Error> for SynthesisError {
    fn from(err: reqwest::Error) -> Self {
        SynthesisError::Transport(err.to_string())
    }
}

/// Reference sample handed to a cloning call.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceAudio {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl ReferenceAudio {
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    /// File name sent along with the multipart upload
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("reference.wav")
            .to_string()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Repository for TTS synthesis operations.
/// Abstracts the remote TTS / voice-cloning backend.
///
/// Calls carry no client-side timeout: the backend may need minutes to load
/// its models on first use. Implementations never retry.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize with a server-side preset voice
    ///
    /// Returns the raw audio bytes produced by the backend.
    async fn synthesize_builtin(
        &self,
        request: &SynthesisRequest,
        voice: &str,
    ) -> Result<Vec<u8>, SynthesisError>;

    /// Synthesize in the voice of `reference`
    ///
    /// A non-empty `reference_text` selects same-language cloning, otherwise
    /// cross-language cloning is used.
    async fn synthesize_clone(
        &self,
        request: &SynthesisRequest,
        reference: &ReferenceAudio,
        reference_text: Option<&str>,
    ) -> Result<Vec<u8>, SynthesisError>;

    /// Connectivity probe
    async fn check_health(&self) -> Result<(), SynthesisError>;
}

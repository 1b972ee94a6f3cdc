use crate::domain::tts::SynthesisRequest;
use crate::infrastructure::repositories::{ReferenceAudio, SynthesisError, TtsRepository};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    BuiltIn {
        text: String,
        voice: String,
    },
    Clone {
        text: String,
        reference_path: PathBuf,
        reference_bytes: Vec<u8>,
        reference_text: Option<String>,
    },
}

impl RecordedCall {
    pub fn text(&self) -> &str {
        match self {
            RecordedCall::BuiltIn { text, .. } | RecordedCall::Clone { text, .. } => text,
        }
    }
}

/// Scripted backend: call `n` (0-based) answers `audio-{n}`, unless it is the failing call.
#[derive(Default)]
pub struct MockTtsRepository {
    calls: Mutex<Vec<RecordedCall>>,
    fail_on_call: Option<(usize, SynthesisError)>,
}

impl MockTtsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(call_index: usize, error: SynthesisError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_call: Some((call_index, error)),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn audio_for(call_index: usize) -> Vec<u8> {
        format!("audio-{}", call_index).into_bytes()
    }

    fn record(&self, call: RecordedCall) -> Result<Vec<u8>, SynthesisError> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push(call);
        match &self.fail_on_call {
            Some((failing, error)) if *failing == index => Err(error.clone()),
            _ => Ok(Self::audio_for(index)),
        }
    }
}

#[async_trait]
impl TtsRepository for MockTtsRepository {
    async fn synthesize_builtin(
        &self,
        request: &SynthesisRequest,
        voice: &str,
    ) -> Result<Vec<u8>, SynthesisError> {
        self.record(RecordedCall::BuiltIn {
            text: request.text.clone(),
            voice: voice.to_string(),
        })
    }

    async fn synthesize_clone(
        &self,
        request: &SynthesisRequest,
        reference: &ReferenceAudio,
        reference_text: Option<&str>,
    ) -> Result<Vec<u8>, SynthesisError> {
        self.record(RecordedCall::Clone {
            text: request.text.clone(),
            reference_path: reference.path.clone(),
            reference_bytes: reference.bytes.clone(),
            reference_text: reference_text.map(str::to_string),
        })
    }

    async fn check_health(&self) -> Result<(), SynthesisError> {
        Ok(())
    }
}

pub fn http_500() -> SynthesisError {
    SynthesisError::Http {
        status: 500,
        status_text: "Internal Server Error".to_string(),
        body: Some("boom".to_string()),
    }
}

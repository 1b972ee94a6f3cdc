use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Backend model generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    #[default]
    V2,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One synthesis call worth of text and prosody
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub speed: f32,
    pub version: ApiVersion,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, speed: f32, version: ApiVersion) -> Self {
        Self {
            text: text.into(),
            speed,
            version,
        }
    }
}

fn default_speed() -> f32 {
    1.0
}

/// Request for POST /api/tts/synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    /// Built-in voice name or `custom:{fileName}`
    pub voice: String,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default)]
    pub version: ApiVersion,
}

/// Request for POST /api/clone
#[derive(Debug, Serialize, Deserialize)]
pub struct CloneRequest {
    pub text: String,
    pub reference_audio: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_text: Option<String>,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default)]
    pub version: ApiVersion,
}

/// Response for single-shot synthesis endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechResponse {
    pub output_path: PathBuf,
    pub audio_size_bytes: usize,
}

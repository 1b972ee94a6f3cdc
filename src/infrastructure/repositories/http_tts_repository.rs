use super::tts_repository::{ReferenceAudio, SynthesisError, TtsRepository};
use crate::domain::tts::SynthesisRequest;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use std::time::Duration;

/// The connectivity probe is the only backend call with a timeout
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct BuiltInPayload<'a> {
    text: &'a str,
    role: &'a str,
    speed: f32,
    version: &'a str,
}

/// HTTP implementation of the TTS repository
pub struct HttpTtsRepository {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpTtsRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Same-language cloning needs the sample's transcript
    fn clone_endpoint(reference_text: Option<&str>) -> &'static str {
        match reference_text {
            Some(text) if !text.trim().is_empty() => "/clone_eq",
            _ => "/clone",
        }
    }

    /// Turn a backend response into audio bytes or a descriptive error
    async fn read_audio(response: reqwest::Response) -> Result<Vec<u8>, SynthesisError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .ok()
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty());
            return Err(SynthesisError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl TtsRepository for HttpTtsRepository {
    async fn synthesize_builtin(
        &self,
        request: &SynthesisRequest,
        voice: &str,
    ) -> Result<Vec<u8>, SynthesisError> {
        let start_time = std::time::Instant::now();
        tracing::info!(
            voice = voice,
            speed = request.speed,
            version = %request.version,
            text_length = request.text.chars().count(),
            "Calling TTS backend /tts"
        );

        let payload = BuiltInPayload {
            text: &request.text,
            role: voice,
            speed: request.speed,
            version: request.version.as_str(),
        };

        let response = self
            .http_client
            .post(format!("{}/tts", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice = voice, "TTS backend unreachable");
                SynthesisError::from(e)
            })?;

        let audio = Self::read_audio(response).await.map_err(|e| {
            tracing::error!(error = %e, voice = voice, "TTS backend call failed");
            e
        })?;

        tracing::info!(
            audio_size_bytes = audio.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Built-in voice audio received"
        );

        Ok(audio)
    }

    async fn synthesize_clone(
        &self,
        request: &SynthesisRequest,
        reference: &ReferenceAudio,
        reference_text: Option<&str>,
    ) -> Result<Vec<u8>, SynthesisError> {
        let start_time = std::time::Instant::now();
        let endpoint = Self::clone_endpoint(reference_text);

        tracing::info!(
            endpoint = endpoint,
            reference_audio = %reference.path().display(),
            speed = request.speed,
            version = %request.version,
            text_length = request.text.chars().count(),
            "Calling TTS backend clone endpoint"
        );

        let audio_part = Part::bytes(reference.bytes.clone())
            .file_name(reference.file_name())
            .mime_str("audio/wav")?;

        let mut form = Form::new()
            .text("text", request.text.clone())
            .text("speed", request.speed.to_string())
            .part("reference_audio", audio_part);

        if let Some(text) = reference_text.filter(|t| !t.trim().is_empty()) {
            form = form.text("reference_text", text.to_string());
        }

        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, endpoint))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, endpoint = endpoint, "TTS backend unreachable");
                SynthesisError::from(e)
            })?;

        let audio = Self::read_audio(response).await.map_err(|e| {
            tracing::error!(error = %e, endpoint = endpoint, "Voice clone call failed");
            e
        })?;

        tracing::info!(
            endpoint = endpoint,
            audio_size_bytes = audio.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Cloned audio received"
        );

        Ok(audio)
    }

    async fn check_health(&self) -> Result<(), SynthesisError> {
        let response = self
            .http_client
            .get(format!("{}/health", self.base_url))
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await?;

        Self::read_audio(response).await.map(|_| ())
    }
}

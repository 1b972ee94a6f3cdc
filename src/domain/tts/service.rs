use super::dto::{CloneRequest, SpeechRequest, SpeechResponse, SynthesisRequest};
use super::error::TtsServiceError;
use crate::domain::voice::{resolve_voice, CustomVoice, VoiceSelector};
use crate::infrastructure::repositories::{
    FileRepository, ReferenceAudio, TtsRepository, VoiceSampleRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Longest text accepted by a single synthesis call
pub const MAX_SINGLE_SHOT_CHARS: usize = 1500;

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    voice_repo: Arc<VoiceSampleRepository>,
    file_repo: Arc<FileRepository>,
    save_dir: PathBuf,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        voice_repo: Arc<VoiceSampleRepository>,
        file_repo: Arc<FileRepository>,
        save_dir: PathBuf,
    ) -> Self {
        Self {
            tts_repo,
            voice_repo,
            file_repo,
            save_dir,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize text with a built-in or custom voice and save the result
    ///
    /// Text must be non-empty and at most 1500 characters.
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, TtsServiceError>;

    /// Clone the voice of an arbitrary reference sample and save the result
    async fn clone_voice(&self, request: CloneRequest)
        -> Result<SpeechResponse, TtsServiceError>;

    /// Custom voices currently present in the voice sample directory
    async fn list_voices(&self) -> Result<Vec<CustomVoice>, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, TtsServiceError> {
        let text = validate_text(&request.text)?;
        validate_speed(request.speed)?;

        let voice = resolve_voice(&self.voice_repo, &request.voice).await?;
        tracing::info!(
            voice = %voice.label(),
            text_length = text.chars().count(),
            "TTS synthesis request"
        );

        let synthesis = SynthesisRequest::new(text, request.speed, request.version);
        let audio = match &voice {
            VoiceSelector::BuiltIn(name) => {
                self.tts_repo.synthesize_builtin(&synthesis, name).await?
            }
            VoiceSelector::Custom {
                reference_audio,
                reference_text,
                ..
            } => {
                let reference = self.load_reference(reference_audio).await?;
                self.tts_repo
                    .synthesize_clone(&synthesis, &reference, Some(reference_text.as_str()))
                    .await?
            }
        };

        self.save(audio, "tts").await
    }

    async fn clone_voice(
        &self,
        request: CloneRequest,
    ) -> Result<SpeechResponse, TtsServiceError> {
        let text = validate_text(&request.text)?;
        validate_speed(request.speed)?;

        if request.reference_audio.as_os_str().is_empty() {
            return Err(TtsServiceError::Invalid(
                "Reference audio is required".to_string(),
            ));
        }

        let reference_text = request
            .reference_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        tracing::info!(
            reference_audio = %request.reference_audio.display(),
            same_language = reference_text.is_some(),
            version = %request.version,
            text_length = text.chars().count(),
            "Voice clone request"
        );

        let reference = self.load_reference(&request.reference_audio).await?;
        let synthesis = SynthesisRequest::new(text, request.speed, request.version);
        let audio = self
            .tts_repo
            .synthesize_clone(&synthesis, &reference, reference_text)
            .await?;

        self.save(audio, "clone").await
    }

    async fn list_voices(&self) -> Result<Vec<CustomVoice>, TtsServiceError> {
        Ok(self.voice_repo.list_custom_voices().await?)
    }
}

impl TtsService {
    async fn load_reference(&self, path: &Path) -> Result<ReferenceAudio, TtsServiceError> {
        match self.file_repo.read_bytes(path).await {
            Ok(bytes) => Ok(ReferenceAudio::new(path, bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(TtsServiceError::Invalid(
                format!("Reference audio not found: {}", path.display()),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, audio: Vec<u8>, prefix: &str) -> Result<SpeechResponse, TtsServiceError> {
        self.file_repo.create_dir(&self.save_dir).await?;

        let output_path = self.save_dir.join(timestamped_file_name(prefix));
        self.file_repo.write_bytes(&output_path, &audio).await?;

        tracing::info!(
            output_path = %output_path.display(),
            audio_size_bytes = audio.len(),
            "Synthesized audio saved"
        );

        Ok(SpeechResponse {
            output_path,
            audio_size_bytes: audio.len(),
        })
    }
}

/// `{prefix}_{timestamp}_{suffix}.wav`; the random suffix separates calls in the same millisecond
pub fn timestamped_file_name(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}.wav",
        prefix,
        Utc::now().format("%Y-%m-%dT%H-%M-%S-%3f"),
        &suffix[..8]
    )
}

fn validate_text(text: &str) -> Result<String, TtsServiceError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TtsServiceError::Invalid("Text cannot be empty".to_string()));
    }
    if text.chars().count() > MAX_SINGLE_SHOT_CHARS {
        return Err(TtsServiceError::TooLong(format!(
            "Text must be {} characters or less",
            MAX_SINGLE_SHOT_CHARS
        )));
    }
    Ok(text.to_string())
}

fn validate_speed(speed: f32) -> Result<(), TtsServiceError> {
    if !(speed.is_finite() && speed > 0.0) {
        return Err(TtsServiceError::Invalid(
            "Speed must be a positive number".to_string(),
        ));
    }
    Ok(())
}

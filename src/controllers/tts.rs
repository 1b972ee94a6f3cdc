use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::{
        tts::{CloneRequest, SpeechRequest, SpeechResponse, TtsService, TtsServiceApi},
        voice::CustomVoice,
    },
    error::AppResult,
};

/// Response for GET /api/voices
#[derive(Debug, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<CustomVoice>,
}

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /api/tts/synthesize - Convert text to speech with a built-in or custom voice
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<SpeechRequest>,
    ) -> AppResult<Json<SpeechResponse>> {
        let response = controller.tts_service.synthesize(request).await?;
        Ok(Json(response))
    }

    /// POST /api/clone - Clone the voice of an arbitrary reference sample
    pub async fn clone_voice(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<CloneRequest>,
    ) -> AppResult<Json<SpeechResponse>> {
        let response = controller.tts_service.clone_voice(request).await?;
        Ok(Json(response))
    }

    /// GET /api/voices - List custom voices in the sample directory
    pub async fn list_voices(
        State(controller): State<Arc<TtsController>>,
    ) -> AppResult<Json<VoicesResponse>> {
        let voices = controller.tts_service.list_voices().await?;
        Ok(Json(VoicesResponse { voices }))
    }
}

use super::model::{VoiceSelector, CUSTOM_VOICE_PREFIX};
use crate::infrastructure::repositories::VoiceSampleRepository;

#[derive(Debug, thiserror::Error)]
pub enum VoiceResolveError {
    #[error("{0}")]
    Invalid(String),
    #[error("failed to read voice samples: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode the front-end's voice string into a `VoiceSelector`.
///
/// The voice sample directory is only enumerated for `custom:` voices.
pub async fn resolve_voice(
    voice_repo: &VoiceSampleRepository,
    wire: &str,
) -> Result<VoiceSelector, VoiceResolveError> {
    let voices = if wire.trim_start().starts_with(CUSTOM_VOICE_PREFIX) {
        voice_repo.list_custom_voices().await?
    } else {
        Vec::new()
    };

    VoiceSelector::decode(wire, &voices).map_err(VoiceResolveError::Invalid)
}

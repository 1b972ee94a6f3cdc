use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Audio extensions recognised in the voice sample directory
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a", "flac"];

/// Wire prefix the front-end uses to address a custom voice by file name
pub const CUSTOM_VOICE_PREFIX: &str = "custom:";

/// A user supplied reference sample discovered by its file name
/// (`name-referenceText.ext`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomVoice {
    pub name: String,
    pub reference_text: String,
    pub file_path: PathBuf,
    pub file_name: String,
}

impl CustomVoice {
    /// Parse a voice sample path.
    ///
    /// The first `-` of the file stem separates the voice name from the
    /// reference text, which may itself contain `-`. Returns `None` for files
    /// without an audio extension, without a separator, or with an empty name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        if !AUDIO_EXTENSIONS.contains(&extension.as_str()) {
            return None;
        }

        let file_name = path.file_name()?.to_str()?.to_string();
        let stem = path.file_stem()?.to_str()?;
        let (name, reference_text) = stem.split_once('-')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            reference_text: reference_text.trim().to_string(),
            file_path: path.to_path_buf(),
            file_name,
        })
    }
}

/// Which voice a synthesis should use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceSelector {
    /// Server-side preset voice
    BuiltIn(String),
    /// Reference sample plus its transcript; an empty transcript selects
    /// cross-language cloning
    Custom {
        file_name: String,
        reference_audio: PathBuf,
        reference_text: String,
    },
}

impl VoiceSelector {
    /// Decode the front-end's voice string against the currently known custom voices.
    ///
    /// A plain name is a built-in voice; `custom:{fileName}` must match a
    /// voice in `voices`.
    pub fn decode(wire: &str, voices: &[CustomVoice]) -> Result<Self, String> {
        let wire = wire.trim();
        if wire.is_empty() {
            return Err("Voice cannot be empty".to_string());
        }

        match wire.strip_prefix(CUSTOM_VOICE_PREFIX) {
            Some(file_name) => voices
                .iter()
                .find(|v| v.file_name == file_name)
                .map(VoiceSelector::from)
                .ok_or_else(|| format!("Unknown custom voice: {}", file_name)),
            None => Ok(VoiceSelector::BuiltIn(wire.to_string())),
        }
    }

    /// Label used in logs and job status
    pub fn label(&self) -> String {
        match self {
            VoiceSelector::BuiltIn(name) => name.clone(),
            VoiceSelector::Custom { file_name, .. } => {
                format!("{}{}", CUSTOM_VOICE_PREFIX, file_name)
            }
        }
    }
}

impl From<&CustomVoice> for VoiceSelector {
    fn from(voice: &CustomVoice) -> Self {
        VoiceSelector::Custom {
            file_name: voice.file_name.clone(),
            reference_audio: voice.file_path.clone(),
            reference_text: voice.reference_text.clone(),
        }
    }
}

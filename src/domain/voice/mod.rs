pub mod model;
pub mod resolver;

pub use model::{CustomVoice, VoiceSelector, AUDIO_EXTENSIONS, CUSTOM_VOICE_PREFIX};
pub use resolver::{resolve_voice, VoiceResolveError};

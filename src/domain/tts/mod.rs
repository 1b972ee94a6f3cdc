pub mod audio;
pub mod dto;
pub mod error;
pub mod segmenter;
pub mod service;

pub use audio::merge_audio_buffers;
pub use dto::{ApiVersion, CloneRequest, SpeechRequest, SpeechResponse, SynthesisRequest};
pub use error::TtsServiceError;
pub use segmenter::split_into_segments;
pub use service::{TtsService, TtsServiceApi, MAX_SINGLE_SHOT_CHARS};

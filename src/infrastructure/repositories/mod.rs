pub mod file_repository;
pub mod http_tts_repository;
pub mod tts_repository;
pub mod voice_sample_repository;

pub use file_repository::{DecodedText, FileRepository};
pub use http_tts_repository::HttpTtsRepository;
pub use tts_repository::{ReferenceAudio, SynthesisError, TtsRepository};
pub use voice_sample_repository::VoiceSampleRepository;

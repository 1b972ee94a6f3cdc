use crate::domain::voice::CustomVoice;
use std::io;
use std::path::PathBuf;

/// Enumerates custom voices from the voice sample directory.
/// Nothing is cached; every call reads the directory again.
pub struct VoiceSampleRepository {
    sample_dir: PathBuf,
}

impl VoiceSampleRepository {
    pub fn new(sample_dir: impl Into<PathBuf>) -> Self {
        Self {
            sample_dir: sample_dir.into(),
        }
    }

    /// List voices sorted by name. A missing directory yields an empty list.
    pub async fn list_custom_voices(&self) -> io::Result<Vec<CustomVoice>> {
        let mut entries = match tokio::fs::read_dir(&self.sample_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    sample_dir = %self.sample_dir.display(),
                    "Voice sample directory does not exist"
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut voices = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match CustomVoice::from_path(&entry.path()) {
                Some(voice) => voices.push(voice),
                None => tracing::debug!(path = %entry.path().display(), "Skipping voice sample"),
            }
        }

        voices.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.file_name.cmp(&b.file_name)));

        tracing::debug!(count = voices.len(), "Custom voices enumerated");

        Ok(voices)
    }
}

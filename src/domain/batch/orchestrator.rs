use super::error::BatchError;
use super::intermediate::IntermediateFiles;
use super::model::{BatchJob, BatchProgress, BatchReport};
use super::progress::{CancellationFlag, ProgressSink};
use crate::domain::tts::{merge_audio_buffers, SynthesisRequest};
use crate::domain::voice::VoiceSelector;
use crate::infrastructure::repositories::{
    FileRepository, ReferenceAudio, SynthesisError, TtsRepository,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Drives one batch: seed segment, voice-locked follow-on segments, merge.
///
/// Segment 1 fixes the voice. In built-in mode it is synthesized with the
/// preset voice and its own output becomes the reference sample for every
/// later segment; in custom mode every segment clones the user's sample.
/// Segments run strictly in order and the first failure aborts the batch.
pub struct BatchOrchestrator {
    tts_repo: Arc<dyn TtsRepository>,
    file_repo: Arc<FileRepository>,
    scratch_root: PathBuf,
    inter_segment_delay: Duration,
}

/// Reference sample and text locked in after the seed segment
struct VoiceLock {
    audio: ReferenceAudio,
    text: String,
}

impl BatchOrchestrator {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        file_repo: Arc<FileRepository>,
        scratch_root: impl Into<PathBuf>,
        inter_segment_delay: Duration,
    ) -> Self {
        Self {
            tts_repo,
            file_repo,
            scratch_root: scratch_root.into(),
            inter_segment_delay,
        }
    }

    pub fn scratch_dir(&self, job: &BatchJob) -> PathBuf {
        self.scratch_root.join(job.job_id.to_string())
    }

    /// Progress is reported as `(current, segment_count + 1)`; the extra
    /// step is the merge, so 100% is only reached once the output exists
    /// and the intermediates are gone.
    pub async fn run(
        &self,
        job: &BatchJob,
        progress: &dyn ProgressSink,
        cancel: &CancellationFlag,
    ) -> Result<BatchReport, BatchError> {
        if job.segments.is_empty() {
            return Err(BatchError::Invalid(
                "Batch has no segments to synthesize".to_string(),
            ));
        }

        let scratch_dir = self.scratch_dir(job);
        self.file_repo.create_dir(&scratch_dir).await?;

        info!(
            job_id = %job.job_id,
            segments = job.segments.len(),
            voice = %job.voice.label(),
            "Starting batch synthesis"
        );

        let mut intermediates = IntermediateFiles::new(&scratch_dir, self.file_repo.clone());
        let result = self
            .synthesize_and_merge(job, &mut intermediates, progress, cancel)
            .await;
        intermediates.cleanup().await;

        let total = job.segments.len() + 1;
        match &result {
            Ok(report) => {
                progress.report(BatchProgress::new(total, total, "Completed"));
                info!(
                    job_id = %job.job_id,
                    output = %report.output_path.display(),
                    size_bytes = report.audio_size_bytes,
                    "Batch synthesis completed"
                );
            }
            Err(e) => error!(job_id = %job.job_id, error = %e, "Batch synthesis failed"),
        }

        result
    }

    async fn synthesize_and_merge(
        &self,
        job: &BatchJob,
        intermediates: &mut IntermediateFiles,
        progress: &dyn ProgressSink,
        cancel: &CancellationFlag,
    ) -> Result<BatchReport, BatchError> {
        let count = job.segments.len();
        let total = count + 1;
        let stem = job.output_stem();
        let mut lock: Option<VoiceLock> = None;

        for (index, text) in job.segments.iter().enumerate() {
            let segment = index + 1;

            if index > 0 && !self.inter_segment_delay.is_zero() {
                tokio::time::sleep(self.inter_segment_delay).await;
            }
            if cancel.is_cancelled() {
                info!(job_id = %job.job_id, segment, "Batch cancelled");
                return Err(BatchError::Cancelled { segment });
            }

            progress.report(BatchProgress::new(
                index,
                total,
                format!("Synthesizing segment {}/{}", segment, count),
            ));

            let request = SynthesisRequest::new(text.clone(), job.speed, job.version);
            let path = intermediates
                .dir()
                .join(format!("{}_segment_{}.wav", stem, segment));

            let audio = match &lock {
                None => {
                    let (audio, voice_lock) = self.synthesize_seed(job, &request, &path).await?;
                    lock = Some(voice_lock);
                    audio
                }
                Some(voice_lock) => self
                    .tts_repo
                    .synthesize_clone(&request, &voice_lock.audio, Some(voice_lock.text.as_str()))
                    .await
                    .map_err(|source| BatchError::Segment { segment, source })?,
            };

            intermediates.register(path.clone());
            if let Err(source) = self.file_repo.write_bytes(&path, &audio).await {
                return Err(BatchError::SegmentWrite {
                    segment,
                    path,
                    source,
                });
            }
        }

        let reference_audio = lock
            .map(|l| l.audio.path)
            .ok_or_else(|| BatchError::Invalid("Batch has no segments to synthesize".to_string()))?;

        progress.report(BatchProgress::new(
            count,
            total,
            format!("Merging {} segment files", count),
        ));
        let (output_path, audio_size_bytes) = self
            .merge(intermediates.paths(), &job.output_path)
            .await?;

        Ok(BatchReport {
            output_path,
            segment_count: count,
            audio_size_bytes,
            reference_audio,
        })
    }

    /// Segment 1: returns its audio and the voice lock for the rest
    async fn synthesize_seed(
        &self,
        job: &BatchJob,
        request: &SynthesisRequest,
        seed_path: &Path,
    ) -> Result<(Vec<u8>, VoiceLock), BatchError> {
        let seed_error = |source: SynthesisError| BatchError::Segment { segment: 1, source };

        match &job.voice {
            VoiceSelector::BuiltIn(voice) => {
                let audio = self
                    .tts_repo
                    .synthesize_builtin(request, voice)
                    .await
                    .map_err(seed_error)?;
                let lock = VoiceLock {
                    audio: ReferenceAudio::new(seed_path, audio.clone()),
                    text: request.text.clone(),
                };
                Ok((audio, lock))
            }
            VoiceSelector::Custom {
                reference_audio,
                reference_text,
                ..
            } => {
                let bytes = self
                    .file_repo
                    .read_bytes(reference_audio)
                    .await
                    .map_err(|e| {
                        seed_error(SynthesisError::Io(format!(
                            "failed to read reference sample {}: {}",
                            reference_audio.display(),
                            e
                        )))
                    })?;
                let reference = ReferenceAudio::new(reference_audio, bytes);
                let audio = self
                    .tts_repo
                    .synthesize_clone(request, &reference, Some(reference_text.as_str()))
                    .await
                    .map_err(seed_error)?;
                let lock = VoiceLock {
                    audio: reference,
                    text: reference_text.clone(),
                };
                Ok((audio, lock))
            }
        }
    }

    /// Reads the intermediates back in segment order and writes the output
    async fn merge(
        &self,
        segment_paths: &[PathBuf],
        output_path: &Path,
    ) -> Result<(PathBuf, usize), BatchError> {
        let mut buffers = Vec::with_capacity(segment_paths.len());
        for path in segment_paths {
            let bytes = self.file_repo.read_bytes(path).await.map_err(|e| {
                BatchError::Io(format!(
                    "failed to read intermediate {}: {}",
                    path.display(),
                    e
                ))
            })?;
            buffers.push(bytes);
        }

        let merged = merge_audio_buffers(&buffers);
        if let Some(parent) = output_path.parent() {
            self.file_repo.create_dir(parent).await?;
        }
        if let Err(e) = self.file_repo.write_bytes(output_path, &merged).await {
            warn!(output = %output_path.display(), error = %e, "Failed to write merged audio");
            return Err(e.into());
        }

        Ok((output_path.to_path_buf(), merged.len()))
    }
}

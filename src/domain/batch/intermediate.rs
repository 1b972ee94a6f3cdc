use crate::infrastructure::repositories::FileRepository;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-job scratch directory and the segment files written into it.
///
/// `cleanup` removes everything asynchronously; if the guard is dropped
/// without it (panic, aborted task) the files are removed synchronously.
pub struct IntermediateFiles {
    dir: PathBuf,
    paths: Vec<PathBuf>,
    file_repo: Arc<FileRepository>,
    cleaned: bool,
}

impl IntermediateFiles {
    pub fn new(dir: impl Into<PathBuf>, file_repo: Arc<FileRepository>) -> Self {
        Self {
            dir: dir.into(),
            paths: Vec::new(),
            file_repo,
            cleaned: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Track a path before anything is written to it
    pub fn register(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Best effort: failures are logged and never fail the batch
    pub async fn cleanup(mut self) {
        for path in std::mem::take(&mut self.paths) {
            if let Err(e) = self.file_repo.delete_file(&path).await {
                warn!(path = %path.display(), error = %e, "Failed to delete intermediate file");
            }
        }

        if let Err(e) = tokio::fs::remove_dir(&self.dir).await {
            debug!(dir = %self.dir.display(), error = %e, "Scratch directory not removed");
        }
        self.cleaned = true;
    }
}

impl Drop for IntermediateFiles {
    fn drop(&mut self) {
        if self.cleaned {
            return;
        }

        for path in self.paths.drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to delete intermediate file")
                }
            }
        }
        let _ = std::fs::remove_dir(&self.dir);
    }
}

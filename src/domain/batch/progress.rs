use super::model::BatchProgress;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives `(current, total, message)` updates while a batch runs
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: BatchProgress);
}

impl<F> ProgressSink for F
where
    F: Fn(BatchProgress) + Send + Sync,
{
    fn report(&self, progress: BatchProgress) {
        self(progress)
    }
}

/// Cooperative cancellation, checked between segments
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

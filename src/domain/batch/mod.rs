pub mod error;
pub mod intermediate;
pub mod model;
pub mod orchestrator;
pub mod progress;
pub mod registry;
pub mod service;

pub use error::BatchError;
pub use intermediate::IntermediateFiles;
pub use model::{
    BatchJob, BatchJobStatus, BatchProgress, BatchReport, BatchRequest, BatchStarted, BatchState,
};
pub use orchestrator::BatchOrchestrator;
pub use progress::{CancellationFlag, ProgressSink};
pub use registry::BatchJobRegistry;
pub use service::{BatchService, BatchServiceApi};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::batch::{BatchJobStatus, BatchRequest, BatchService, BatchServiceApi, BatchStarted},
    error::AppResult,
};

pub struct BatchController {
    batch_service: Arc<BatchService>,
}

impl BatchController {
    pub fn new(batch_service: Arc<BatchService>) -> Self {
        Self { batch_service }
    }

    /// POST /api/batch - Segment text and start background synthesis
    pub async fn start_batch(
        State(controller): State<Arc<BatchController>>,
        Json(request): Json<BatchRequest>,
    ) -> AppResult<(StatusCode, Json<BatchStarted>)> {
        let started = controller.batch_service.start_batch(request).await?;
        Ok((StatusCode::ACCEPTED, Json(started)))
    }

    /// GET /api/batch/{jobId} - Job state and progress
    pub async fn get_batch(
        State(controller): State<Arc<BatchController>>,
        Path(job_id): Path<Uuid>,
    ) -> AppResult<Json<BatchJobStatus>> {
        let status = controller.batch_service.job_status(job_id)?;
        Ok(Json(status))
    }

    /// POST /api/batch/{jobId}/cancel - Stop before the next segment
    pub async fn cancel_batch(
        State(controller): State<Arc<BatchController>>,
        Path(job_id): Path<Uuid>,
    ) -> AppResult<(StatusCode, Json<BatchJobStatus>)> {
        let status = controller.batch_service.cancel_batch(job_id)?;
        Ok((StatusCode::ACCEPTED, Json(status)))
    }
}

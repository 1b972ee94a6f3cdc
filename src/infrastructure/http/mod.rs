use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    controllers::{batch::BatchController, health, tts::TtsController},
    domain::{
        batch::{BatchOrchestrator, BatchService},
        tts::TtsService,
    },
    infrastructure::{
        config::Config,
        repositories::{FileRepository, HttpTtsRepository, TtsRepository, VoiceSampleRepository},
    },
};

pub mod request_id;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Wire repositories, services and controllers against the configured backend
pub fn build_app(config: &Config) -> Router {
    let tts_repo: Arc<dyn TtsRepository> = Arc::new(HttpTtsRepository::new(&config.tts_api_url));
    build_app_with_backend(config, tts_repo)
}

/// Same as `build_app` with an explicit TTS backend
pub fn build_app_with_backend(config: &Config, tts_repo: Arc<dyn TtsRepository>) -> Router {
    // 1. Repositories
    tracing::info!("Instantiating repositories...");
    let file_repo = Arc::new(FileRepository::new());
    let voice_repo = Arc::new(VoiceSampleRepository::new(config.voice_sample_dir.clone()));

    // 2. Services
    tracing::info!("Instantiating services...");
    let tts_service = Arc::new(TtsService::new(
        tts_repo.clone(),
        voice_repo.clone(),
        file_repo.clone(),
        config.save_dir(),
    ));
    let orchestrator = Arc::new(BatchOrchestrator::new(
        tts_repo.clone(),
        file_repo.clone(),
        config.tmp_dir(),
        config.segment_throttle(),
    ));
    let batch_service = Arc::new(BatchService::new(
        orchestrator,
        voice_repo,
        file_repo,
        config.batch_output_dir(),
        config.default_segment_size,
    ));

    // 3. Controllers
    tracing::info!("Instantiating controllers...");
    let tts_controller = Arc::new(TtsController::new(tts_service));
    let batch_controller = Arc::new(BatchController::new(batch_service));

    build_router(tts_repo, tts_controller, batch_controller)
}

/// All routes with request ID, tracing and CORS layers
pub fn build_router(
    tts_repo: Arc<dyn TtsRepository>,
    tts_controller: Arc<TtsController>,
    batch_controller: Arc<BatchController>,
) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(tts_repo);

    let tts_routes = Router::new()
        .route("/api/tts/synthesize", post(TtsController::synthesize))
        .route("/api/clone", post(TtsController::clone_voice))
        .route("/api/voices", get(TtsController::list_voices))
        .with_state(tts_controller);

    let batch_routes = Router::new()
        .route("/api/batch", post(BatchController::start_batch))
        .route("/api/batch/:job_id", get(BatchController::get_batch))
        .route("/api/batch/:job_id/cancel", post(BatchController::cancel_batch))
        .with_state(batch_controller);

    Router::new()
        .merge(health_routes)
        .merge(tts_routes)
        .merge(batch_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        // the desktop front-end calls from its own origin
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

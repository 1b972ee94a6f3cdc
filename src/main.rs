use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voicedesk_backend::infrastructure::config::{Config, LogFormat};
use voicedesk_backend::infrastructure::http::{build_app, start_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting VoiceDesk Backend on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        tts_api_url = %config.tts_api_url,
        data_dir = %config.data_dir.display(),
        voice_sample_dir = %config.voice_sample_dir.display(),
        segment_size = config.default_segment_size,
        segment_throttle_ms = config.segment_throttle_ms,
        "Configuration loaded"
    );

    let app = build_app(&config);

    // Start HTTP server with all routes
    start_http_server(Arc::new(config), app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "voicedesk_backend=debug,tower_http=debug"
    } else {
        "voicedesk_backend=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

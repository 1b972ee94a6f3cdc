use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub tts_api_url: String,
    pub data_dir: PathBuf,
    pub default_save_path: Option<PathBuf>,
    pub voice_sample_dir: PathBuf,
    pub default_segment_size: usize,
    pub segment_throttle_ms: u64,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| ".".to_string()));

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            tts_api_url: env::var("TTS_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:9933".to_string())
                .trim_end_matches('/')
                .to_string(),
            default_save_path: env::var("DEFAULT_SAVE_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            voice_sample_dir: env::var("VOICE_SAMPLE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir.join("voices")),
            default_segment_size: env::var("DEFAULT_SEGMENT_SIZE")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            segment_throttle_ms: env::var("SEGMENT_THROTTLE_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            data_dir,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Scratch arena for batch intermediates
    pub fn tmp_dir(&self) -> PathBuf {
        self.data_dir.join("tmp")
    }

    /// Where merged batch results are written
    pub fn batch_output_dir(&self) -> PathBuf {
        self.data_dir.join("data").join("txt_to_audio")
    }

    /// Where single-shot results are written; falls back to the batch output directory
    pub fn save_dir(&self) -> PathBuf {
        self.default_save_path
            .clone()
            .unwrap_or_else(|| self.batch_output_dir())
    }

    pub fn segment_throttle(&self) -> Duration {
        Duration::from_millis(self.segment_throttle_ms)
    }
}

use httpmock::MockServer;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use voicedesk_backend::infrastructure::config::{Config, Environment, LogFormat};
use voicedesk_backend::infrastructure::http::build_app;


use api_client::TestClient;

pub struct TestContext {
    pub client: TestClient,
    pub backend: MockServer,
    pub config: Config,
    _data_dir: TempDir,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let backend = MockServer::start_async().await;
            let data_dir = tempfile::tempdir().expect("Failed to create data dir");

            let config = Config {
                host: "127.0.0.1".to_string(),
                port: 0, // Will be assigned by the OS
                tts_api_url: backend.base_url(),
                data_dir: data_dir.path().to_path_buf(),
                default_save_path: None,
                voice_sample_dir: data_dir.path().join("voices"),
                default_segment_size: 300,
                segment_throttle_ms: 0, // No throttling against the mock backend
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
            };
            std::fs::create_dir_all(&config.voice_sample_dir)
                .expect("Failed to create voice sample dir");

            let app = build_app(&config);

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(Duration::from_millis(50)).await;

            Self {
                client: TestClient::new(&base_url),
                backend,
                config,
                _data_dir: data_dir,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Temporary data directory is removed on drop
        }
    }
}

#[allow(dead_code)]
impl TestContext {
    /// Drop a reference sample into the voice sample directory
    pub fn add_voice(&self, file_name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.config.voice_sample_dir.join(file_name);
        std::fs::write(&path, bytes).expect("Failed to write voice sample");
        path
    }

    /// Write a file into the data directory
    pub fn write_file(&self, file_name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.config.data_dir.join(file_name);
        std::fs::write(&path, bytes).expect("Failed to write file");
        path
    }

    /// Poll the job until it leaves the running state
    pub async fn wait_for_batch(&self, job_id: &str) -> Value {
        for _ in 0..300 {
            let response = self
                .client
                .get(&format!("/api/batch/{}", job_id))
                .await
                .unwrap();
            let body = response.body.expect("Missing job status body");
            if body.get("state").and_then(|s| s.as_str()) != Some("running") {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Batch {} did not finish in time", job_id);
    }

    /// Every file left under the batch scratch directory
    pub fn scratch_files(&self) -> Vec<PathBuf> {
        fn collect(dir: &Path, out: &mut Vec<PathBuf>) {
            let Ok(entries) = std::fs::read_dir(dir) else {
                return;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    collect(&path, out);
                } else {
                    out.push(path);
                }
            }
        }

        let mut files = Vec::new();
        collect(&self.config.tmp_dir(), &mut files);
        files
    }
}

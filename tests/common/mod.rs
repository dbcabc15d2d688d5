//! Common test utilities for tutor-service integration tests.

use std::sync::Once;
use tutor_service::config::{DatabaseConfig, OpenAiConfig, TutorConfig};
use tutor_service::startup::Application;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,tutor_service=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Options controlling the spawned application.
#[derive(Default)]
pub struct TestSettings {
    pub api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub database_url: Option<String>,
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// Spawn a test application on a random port.
pub async fn spawn_app(settings: TestSettings) -> TestApp {
    init_tracing();

    let config = TutorConfig {
        port: 0,
        log_level: "debug".to_string(),
        openai: OpenAiConfig {
            api_key: settings.api_key,
            base_url: settings
                .openai_base_url
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: "gpt-4o-mini".to_string(),
        },
        database: DatabaseConfig {
            url: settings.database_url,
            max_connections: 2,
        },
    };

    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    let address = format!("http://127.0.0.1:{}", app.port());

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    TestApp {
        address,
        client: reqwest::Client::new(),
    }
}

//! Application startup and lifecycle management.

use crate::build_router;
use crate::config::TutorConfig;
use crate::error::AppError;
use crate::services::Database;
use crate::services::providers::CompletionProvider;
use crate::services::providers::openai::{OpenAiProvider, OpenAiProviderConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Shared application state.
///
/// `db` and `provider` are `None` when the corresponding configuration is
/// absent; the handlers translate that into a per-request 500.
#[derive(Clone)]
pub struct AppState {
    pub config: TutorConfig,
    pub db: Option<Database>,
    pub provider: Option<Arc<dyn CompletionProvider>>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: TutorConfig) -> Result<Self, AppError> {
        let db = match &config.database.url {
            Some(url) => {
                let db = Database::connect_lazy(url, config.database.max_connections)?;
                if let Err(e) = db.run_migrations().await {
                    tracing::warn!(
                        error = %e,
                        "Migrations failed; continuing, store operations may fail per request"
                    );
                }
                Some(db)
            }
            None => {
                tracing::warn!("DATABASE_URL not set; task history is disabled");
                None
            }
        };

        let provider: Option<Arc<dyn CompletionProvider>> = match &config.openai.api_key {
            Some(api_key) => {
                tracing::info!(model = %config.openai.model, "Initialized OpenAI completion provider");
                Some(Arc::new(OpenAiProvider::new(OpenAiProviderConfig {
                    api_key: api_key.clone(),
                    base_url: config.openai.base_url.clone(),
                    model: config.openai.model.clone(),
                })))
            }
            None => {
                tracing::warn!("OPENAI_API_KEY not set; solve requests will report the missing key");
                None
            }
        };

        // Port 0 = random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState {
            config,
            db,
            provider,
        };

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

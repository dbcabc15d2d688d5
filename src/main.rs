use tutor_service::config::TutorConfig;
use tutor_service::observability::init_tracing;
use tutor_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = TutorConfig::load()
        .map_err(|e| std::io::Error::other(format!("Configuration error: {}", e)))?;

    init_tracing("tutor-service", &config.log_level);

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!("tutor-service listening on port {}", app.port());

    app.run_until_stopped().await
}

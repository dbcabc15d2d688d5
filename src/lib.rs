pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;

use crate::startup::AppState;
use axum::http::{HeaderName, Method, header};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::{Json, Router, extract::State, response::IntoResponse};
use serde_json::json;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the HTTP router.
///
/// Each endpoint gets its own CORS layer because the advertised verb and
/// header sets differ; the layer answers every OPTIONS request itself, so the
/// router only sees real requests and the method-router fallback produces the
/// JSON 405.
pub fn build_router(state: AppState) -> Router {
    let solve_routes = Router::new()
        .route(
            "/solve",
            post(handlers::solve::solve_task).fallback(handlers::method_not_allowed),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
                .max_age(Duration::from_secs(86400)),
        );

    let history_routes = Router::new()
        .route(
            "/history",
            get(handlers::history::get_history).fallback(handlers::method_not_allowed),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([
                    header::CONTENT_TYPE,
                    HeaderName::from_static("x-user-session"),
                ])
                .max_age(Duration::from_secs(86400)),
        );

    Router::new()
        .merge(solve_routes)
        .merge(history_routes)
        .route("/health", get(health_check))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(middleware::REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(middleware::request_id_middleware))
}

/// Liveness probe; an unconfigured store is reported, not treated as failure.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match &state.db {
        Some(db) => match db.health_check().await {
            Ok(()) => "ok",
            Err(_) => "unavailable",
        },
        None => "not configured",
    };

    Json(json!({
        "status": "ok",
        "service": "tutor-service",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}

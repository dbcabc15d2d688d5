//! HTTP handlers for the two public endpoints.
//!
//! OPTIONS preflights never reach these handlers: the per-endpoint CORS layer
//! in `build_router` answers them with the endpoint's verb set, allowed
//! headers, and max-age.

pub mod history;
pub mod solve;

use crate::error::AppError;

/// Shared 405 fallback for verbs outside an endpoint's allowed set.
///
/// Registered as the method-router fallback so it runs before any input
/// parsing.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

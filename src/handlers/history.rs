//! History endpoint: most recent solved tasks for a session.

use crate::error::AppError;
use crate::models::Task;
use crate::startup::AppState;
use axum::{Json, extract::Query, extract::State};
use serde::{Deserialize, Serialize};

/// Upper bound on the client-supplied row limit.
const MAX_LIMIT: i64 = 100;

fn default_user_session() -> String {
    "anonymous".to_string()
}

fn default_limit() -> i64 {
    10
}

/// Coerce the client-supplied limit into the accepted range.
fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_LIMIT)
}

/// Query parameters; a `limit` that does not parse as an integer is rejected
/// by the extractor with a client error rather than silently defaulted.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_user_session")]
    pub user_session: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub tasks: Vec<Task>,
    pub count: usize,
}

#[axum::debug_handler]
pub async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let db = state
        .db
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured("База данных не настроена".to_string()))?;

    let user_session = if params.user_session.trim().is_empty() {
        "anonymous"
    } else {
        params.user_session.trim()
    };
    let limit = clamp_limit(params.limit);

    let tasks = db.recent_tasks(user_session, limit).await.map_err(|e| {
        tracing::error!(error = %e, "Task history query failed");
        AppError::Database(anyhow::anyhow!("Ошибка при получении истории: {}", e))
    })?;

    Ok(Json(HistoryResponse {
        count: tasks.len(),
        tasks,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped_into_accepted_range() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(-5), 1);
        assert_eq!(clamp_limit(1), 1);
        assert_eq!(clamp_limit(10), 10);
        assert_eq!(clamp_limit(100), 100);
        assert_eq!(clamp_limit(100_000), 100);
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One persisted question/solution pair.
///
/// Rows are created once by the solve endpoint and only ever read afterwards;
/// `id` and `created_at` are assigned by the store. `user_session` groups a
/// caller's history and is not part of the serialized history payload.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub question: String,
    pub subject: Option<String>,
    pub solution: String,
    #[serde(skip_serializing)]
    pub user_session: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insertable fields for a task row.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub question: String,
    pub subject: Option<String>,
    pub solution: String,
    pub user_session: String,
}

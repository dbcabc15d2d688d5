//! Database service for tutor-service.

use crate::error::AppError;
use crate::models::{NewTask, Task};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a lazily-connected pool.
    ///
    /// No connection is attempted here: an unreachable store must surface on
    /// the individual request that needs it, not at process start.
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .connect_lazy(database_url)
            .map_err(|e| AppError::Database(anyhow::anyhow!("Invalid database URL: {}", e)))?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Persist a solved task and return the stored row.
    #[instrument(skip(self, input), fields(user_session = %input.user_session))]
    pub async fn insert_task(&self, input: &NewTask) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks_history (question, subject, solution, user_session)
            VALUES ($1, $2, $3, $4)
            RETURNING id, question, subject, solution, user_session, created_at
            "#,
        )
        .bind(&input.question)
        .bind(&input.subject)
        .bind(&input.solution)
        .bind(&input.user_session)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(anyhow::anyhow!("Failed to insert task: {}", e)))?;

        info!(task_id = task.id, "Task persisted");

        Ok(task)
    }

    /// Fetch the most recent tasks for a session, newest first.
    #[instrument(skip(self), fields(user_session = %user_session, limit = limit))]
    pub async fn recent_tasks(&self, user_session: &str, limit: i64) -> Result<Vec<Task>, AppError> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, question, subject, solution, user_session, created_at
            FROM tasks_history
            WHERE user_session = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_session)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(anyhow::anyhow!("Failed to query task history: {}", e)))
    }
}

//! Solve endpoint: forward a student's question to the completion service.

use crate::error::AppError;
use crate::middleware::RequestId;
use crate::models::NewTask;
use crate::services::providers::CompletionRequest;
use crate::startup::AppState;
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

/// Fixed sampling parameters for the tutoring persona.
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: i32 = 2000;

/// Tutoring persona instruction sent as the system message.
const SYSTEM_PROMPT: &str = "\
Ты - опытный преподаватель и репетитор. Твоя задача - помогать ученикам решать задачи и объяснять темы максимально понятно.

Правила:
- Всегда давай подробные пошаговые объяснения
- Используй простой язык, понятный школьникам
- Если это задача - покажи каждый шаг решения
- Если это теория - объясни простыми словами с примерами
- Форматируй ответ в markdown для удобства чтения
- Будь дружелюбным и поддерживающим";

#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    pub question: String,
    pub subject: Option<String>,
    pub user_session: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SolveResponse {
    pub solution: String,
    pub subject: Option<String>,
    pub task_id: Option<i32>,
    pub request_id: String,
}

#[axum::debug_handler]
pub async fn solve_task(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(req): Json<SolveRequest>,
) -> Result<Json<SolveResponse>, AppError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest(
            "Вопрос не может быть пустым".to_string(),
        ));
    }

    // Capability check: the provider exists only when the key was configured,
    // so no outbound call is ever attempted without it.
    let provider = state
        .provider
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured("API ключ OpenAI не настроен".to_string()))?;

    let mut system_prompt = SYSTEM_PROMPT.to_string();
    if let Some(subject) = &req.subject {
        system_prompt.push_str(&format!("\n\nПредмет: {}", subject));
    }

    let completion = CompletionRequest {
        system_prompt,
        user_message: question.to_string(),
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    };

    let solution = provider.complete(&completion).await.map_err(|e| {
        tracing::error!(error = %e, "Completion service call failed");
        AppError::Upstream(format!("Ошибка сервиса OpenAI: {}", e))
    })?;

    let user_session = req
        .user_session
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("anonymous");

    // Best-effort persistence: a store failure must not fail the answer the
    // student is waiting for.
    let task_id = match &state.db {
        Some(db) => {
            let new_task = NewTask {
                question: question.to_string(),
                subject: req.subject.clone(),
                solution: solution.clone(),
                user_session: user_session.to_string(),
            };
            match db.insert_task(&new_task).await {
                Ok(task) => Some(task.id),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to persist solved task; returning without task_id");
                    None
                }
            }
        }
        None => None,
    };

    Ok(Json(SolveResponse {
        solution,
        subject: req.subject,
        task_id,
        request_id: request_id.0,
    }))
}

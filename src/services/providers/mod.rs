//! Chat-completion provider abstraction.
//!
//! A trait-based seam in front of the external completion service so the
//! handler depends on the contract, not on the OpenAI wire format.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// One completion call: a system instruction plus the user's question.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub temperature: f32,
    pub max_tokens: i32,
}

/// Trait for chat-completion providers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run the completion and return the generated text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

pub mod handlers;
pub mod models;
pub mod routes;

use axum::Json;
use axum::response::{IntoResponse, Response};
use hyper::StatusCode;
use thiserror::Error;

use crate::ollama::{ChatClient, ChatMessage, OllamaError};
use models::ErrorResponse;

pub const SYSTEM_PROMPT: &str = "You are an AI assistant that explains code simply.";
pub const USER_PROMPT_PREFIX: &str = "Explain the following code:\n\n";
pub const NO_CODE_PROVIDED: &str = "No code provided";

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("{0}")]
    InvalidInput(String),

    /// Anything that went wrong talking to the model. The message goes back to the caller as-is.
    #[error(transparent)]
    Upstream(#[from] OllamaError),
}

impl ExplainError {
    pub fn status(&self) -> StatusCode {
        match self {
            ExplainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ExplainError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ExplainError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ExplainError::InvalidInput(reason) => {
                tracing::warn!(%reason, "rejected explain request");
            }
            ExplainError::Upstream(e) => {
                tracing::error!(error = %e, "chat request to Ollama failed");
            }
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// The fixed two-turn conversation sent for every snippet.
pub fn build_prompt(code: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!("{USER_PROMPT_PREFIX}{code}")),
    ]
}

pub async fn explain(
    client: &dyn ChatClient,
    model: &str,
    code: Option<&str>,
) -> Result<String, ExplainError> {
    let code = code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ExplainError::InvalidInput(NO_CODE_PROVIDED.to_string()))?;

    tracing::info!(model, code_len = code.len(), "requesting explanation");

    let messages = build_prompt(code);
    let response = client.chat(model, &messages).await?;

    Ok(response.message.content)
}

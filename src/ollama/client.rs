use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::models::{ChatMessage, ChatRequest, ChatResponse, ErrorBody};

const USER_AGENT: &str = "code-explainer";

#[derive(Debug, Error)]
pub enum OllamaError {
    #[error(
        "Failed to connect to Ollama at {url}. Please check that Ollama is downloaded, running and accessible. https://ollama.com/download"
    )]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message} (status code: {status})")]
    Response { status: u16, message: String },

    #[error("invalid response from Ollama: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// A chat-completion backend: one model, one conversation, one reply.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn chat(&self, model: &str, messages: &[ChatMessage])
    -> Result<ChatResponse, OllamaError>;
}

pub struct HttpOllamaClient {
    client: Client,
    base_url: String,
}

impl HttpOllamaClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ChatClient for HttpOllamaClient {
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<ChatResponse, OllamaError> {
        let url = format!("{}/api/chat", self.base_url);
        let payload = ChatRequest {
            model,
            messages,
            stream: false,
        };

        let resp = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    OllamaError::Connect {
                        url: self.base_url.clone(),
                        source: e,
                    }
                } else {
                    OllamaError::Request(e)
                }
            })?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(response_error(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn response_error(status: StatusCode, body: &str) -> OllamaError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.trim().to_string(),
    };
    OllamaError::Response {
        status: status.as_u16(),
        message,
    }
}

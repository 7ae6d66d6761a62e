//! Fakes and helpers shared by the router tests.

use async_trait::async_trait;
use axum::Router;
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::app::{AppState, create_app};
use crate::config::Config;
use crate::ollama::{ChatClient, ChatMessage, ChatResponse, OllamaError, Role};

enum Reply {
    Fixed(String),
    Fail { status: u16, message: String },
    /// Answers with the user turn, after a delay that shrinks with input length.
    Echo,
}

pub(crate) struct RecordingClient {
    reply: Reply,
    calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl RecordingClient {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(text: &str) -> Self {
        Self::new(Reply::Fixed(text.to_string()))
    }

    pub(crate) fn failing(status: u16, message: &str) -> Self {
        Self::new(Reply::Fail {
            status,
            message: message.to_string(),
        })
    }

    pub(crate) fn echoing() -> Self {
        Self::new(Reply::Echo)
    }

    pub(crate) fn calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for RecordingClient {
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<ChatResponse, OllamaError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));

        let content = match &self.reply {
            Reply::Fixed(text) => text.clone(),
            Reply::Fail { status, message } => {
                return Err(OllamaError::Response {
                    status: *status,
                    message: message.clone(),
                });
            }
            Reply::Echo => {
                let user = messages.last().map(|m| m.content.clone()).unwrap_or_default();
                let delay = 50u64.saturating_sub(user.len() as u64);
                tokio::time::sleep(Duration::from_millis(delay)).await;
                format!("echo: {user}")
            }
        };

        Ok(ChatResponse {
            model: model.to_string(),
            message: ChatMessage {
                role: Role::Assistant,
                content,
            },
            done: true,
        })
    }
}

pub(crate) fn test_config(model: &str) -> Config {
    let model = model.to_string();
    Config::from_vars(move |key| (key == "OLLAMA_MODEL").then(|| model.clone()))
}

pub(crate) fn app_with_client(model: &str, client: Arc<RecordingClient>) -> Router {
    create_app(AppState {
        config: Arc::new(test_config(model)),
        chat_client: client,
    })
}

pub(crate) fn test_app(
    model: &str,
    reply: Result<String, (u16, String)>,
) -> (Router, Arc<RecordingClient>) {
    let client = Arc::new(match reply {
        Ok(text) => RecordingClient::replying(&text),
        Err((status, message)) => RecordingClient::failing(status, &message),
    });
    (app_with_client(model, client.clone()), client)
}

pub(crate) async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collects the level of every event emitted while installed.
#[derive(Clone, Default)]
pub(crate) struct EventLevels(Arc<Mutex<Vec<Level>>>);

impl EventLevels {
    pub(crate) fn count(&self, level: Level) -> usize {
        self.0.lock().unwrap().iter().filter(|l| **l == level).count()
    }
}

impl<S: Subscriber> Layer<S> for EventLevels {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.0.lock().unwrap().push(*event.metadata().level());
    }
}

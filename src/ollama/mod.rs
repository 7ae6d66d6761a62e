pub mod client;
pub mod models;

pub use client::{ChatClient, HttpOllamaClient, OllamaError};
pub use models::{ChatMessage, ChatResponse, Role};

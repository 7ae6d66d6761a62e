pub mod middleware;
pub mod slices;

#[cfg(test)]
pub(crate) mod testing;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use hyper::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnFailure, TraceLayer};
use tracing::Level;

use crate::app::middleware::enrich_current_span::enrich_current_span_middleware;
use crate::app::middleware::strip_trailing_slash::strip_trailing_slash;
use crate::config::Config;
use crate::ollama::ChatClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub chat_client: Arc<dyn ChatClient>,
}

async fn not_found(req: Request<Body>) -> impl IntoResponse {
    tracing::warn!("unhandled path: {}", req.uri());
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.config.model,
    }))
}

fn request_span(req: &Request<Body>) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        http.uri = tracing::field::Empty,
        http.host = tracing::field::Empty,
        http.query = tracing::field::Empty,
        http.origin = tracing::field::Empty,
    )
}

pub fn create_app(state: AppState) -> Router {
    let health_routes = Router::new().route("/", get(health));

    let explain_routes = slices::explain::routes::routes();

    Router::new()
        .nest("/health", health_routes)
        .nest("/explain", explain_routes)
        .fallback(not_found)
        .with_state(state)
        .layer(axum::middleware::from_fn(strip_trailing_slash))
        .layer(axum::middleware::from_fn(enrich_current_span_middleware))
        .layer(
            // 5xx responses are already reported at ERROR by the handler that produced them.
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_failure(DefaultOnFailure::new().level(Level::WARN)),
        )
        .layer(CorsLayer::permissive())
}

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;

use super::handlers::explain_code;
use crate::app::AppState;

pub fn routes() -> Router<AppState> {
    // Snippets are forwarded whole, so no request size cap here.
    Router::new().route("/", post(explain_code).layer(DefaultBodyLimit::disable()))
}

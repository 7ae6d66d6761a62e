use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use super::models::{ExplainRequest, ExplainResponse};
use super::{ExplainError, explain};
use crate::app::AppState;

#[tracing::instrument(skip_all)]
pub async fn explain_code(
    State(state): State<AppState>,
    body: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ExplainError> {
    let Json(request) =
        body.map_err(|rejection| ExplainError::InvalidInput(rejection.body_text()))?;
    let code = request.into_code();

    let explanation = explain(
        state.chat_client.as_ref(),
        &state.config.model,
        code.as_deref(),
    )
    .await?;

    Ok(Json(ExplainResponse { explanation }))
}

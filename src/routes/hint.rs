//! Route handler for hint ranking.

use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    dto::hint::{HintRequest, HintResponse},
    error::AppError,
    services::hint_service,
    state::SharedState,
};

/// Routes ranking candidate links against the target article.
pub fn router() -> Router<SharedState> {
    Router::new().route("/games/hint", post(hint))
}

/// Rank candidate links by semantic closeness to the target article.
#[utoipa::path(
    post,
    path = "/api/v1/games/hint",
    tag = "hint",
    request_body = HintRequest,
    responses(
        (status = 200, description = "Candidates ranked", body = HintResponse),
        (status = 400, description = "Invalid payload or oversized batch"),
        (status = 503, description = "Embedding backend unavailable")
    )
)]
pub async fn hint(
    State(state): State<SharedState>,
    Json(payload): Json<HintRequest>,
) -> Result<Json<HintResponse>, AppError> {
    payload.validate()?;
    let response = hint_service::rank_links(&state, payload).await?;
    Ok(Json(response))
}

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{debug, instrument};

use crate::{
    error::AppError,
    meals::{dto::SuccessResponse, handlers::required},
    state::AppState,
};

use super::dto::FeedbackRequest;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/feedback", post(submit_feedback))
}

#[instrument(skip(state, body))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    body: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(body) = body?;
    let note = required(body.note, "note")?;
    let saved = state.store.insert_feedback(&note).await?;
    debug!(feedback_id = %saved.id, "feedback stored");
    Ok(Json(SuccessResponse::ok()))
}

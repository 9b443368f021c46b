use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{error::AppError, state::AppState};

use super::dto::{MealListItem, SaveMealRequest, StatsResponse, SuccessResponse};
use super::repo::NewMeal;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/api/history", get(get_history))
        .route("/api/get-history", get(get_history))
        .route("/api/stats", get(get_stats))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/api/save-meal", post(save_meal))
}

#[instrument(skip(state))]
pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<MealListItem>>, AppError> {
    let meals = state
        .store
        .recent_meals(state.config.history_limit)
        .await?;
    Ok(Json(meals.into_iter().map(MealListItem::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let total_scans = state.store.count_meals().await?;
    Ok(Json(StatsResponse { total_scans }))
}

/// POST /api/save-meal { foodName, goal, calories? }
///
/// Logs a meal without going through the AI. Repeated submissions create
/// repeated rows.
#[instrument(skip(state, body))]
pub async fn save_meal(
    State(state): State<AppState>,
    body: Result<Json<SaveMealRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(body) = body?;
    let food_name = required(body.food_name, "foodName")?;
    let goal = required(body.goal, "goal")?;

    let meal = state
        .store
        .insert_meal(NewMeal {
            food_name,
            calories: body.calories,
            goal,
        })
        .await?;
    info!(meal_id = %meal.id, "meal saved");
    Ok(Json(SuccessResponse::ok()))
}

pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::bad_request(format!("{field} is required"))),
    }
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::Meal;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealListItem {
    pub id: Uuid,
    pub food_name: String,
    pub calories: Option<f64>,
    pub goal: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl From<Meal> for MealListItem {
    fn from(m: Meal) -> Self {
        Self {
            id: m.id,
            food_name: m.food_name,
            calories: m.calories,
            goal: m.goal,
            timestamp: m.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_scans: i64,
}

/// Body of `POST /api/save-meal`. Fields are optional here so a missing one
/// becomes a 400 with a readable message instead of a serde rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMealRequest {
    pub food_name: Option<String>,
    pub goal: Option<String>,
    pub calories: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

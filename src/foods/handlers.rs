use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{error::AppError, meals::handlers::required, state::AppState};

use super::dto::{CreateFoodRequest, FoodItem};
use super::repo::NewFood;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_food))
        .route("/all", get(list_foods))
}

/// POST /add { name, calories, protein?, carbs?, fat? }
#[instrument(skip(state, body))]
pub async fn add_food(
    State(state): State<AppState>,
    body: Result<Json<CreateFoodRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FoodItem>), AppError> {
    let Json(body) = body?;
    let name = required(body.name, "name")?;
    let calories = body
        .calories
        .ok_or_else(|| AppError::bad_request("calories is required"))?;

    let food = state
        .store
        .insert_food(NewFood {
            name,
            calories,
            protein: body.protein,
            carbs: body.carbs,
            fat: body.fat,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(food.into())))
}

#[instrument(skip(state))]
pub async fn list_foods(State(state): State<AppState>) -> Result<Json<Vec<FoodItem>>, AppError> {
    let foods = state.store.list_foods().await?;
    Ok(Json(foods.into_iter().map(FoodItem::from).collect()))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::testing::{body_json, TestHarness};

    fn add(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/add")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn add_defaults_macros_and_lists_in_insertion_order() {
        let h = TestHarness::new();

        let res = h
            .app()
            .oneshot(add(serde_json::json!({ "name": "Banana", "calories": 105 })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let saved = body_json(res).await;
        assert_eq!(saved["name"], "Banana");
        assert_eq!(saved["calories"], 105.0);
        assert_eq!(saved["protein"], 0.0);
        assert!(saved["id"].is_string());

        h.app()
            .oneshot(add(serde_json::json!({
                "name": "Paneer", "calories": 265, "protein": 18.3, "fat": 20.8
            })))
            .await
            .unwrap();

        let res = h
            .app()
            .oneshot(Request::get("/all").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let all = body_json(res).await;
        let all = all.as_array().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["name"], "Banana");
        assert_eq!(all[1]["name"], "Paneer");
        assert_eq!(all[1]["protein"], 18.3);
    }

    #[tokio::test]
    async fn add_requires_name_and_calories() {
        let h = TestHarness::new();
        let res = h
            .app()
            .oneshot(add(serde_json::json!({ "name": "Mystery" })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["error"], "calories is required");

        let res = h
            .app()
            .oneshot(add(serde_json::json!({ "calories": 10 })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}

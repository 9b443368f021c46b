use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub food_name: String,
    pub calories: Option<f64>,
    pub goal: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub food_name: String,
    pub calories: Option<f64>,
    pub goal: String,
}

pub async fn insert(db: &PgPool, meal: &NewMeal) -> anyhow::Result<Meal> {
    let row = sqlx::query_as::<_, Meal>(
        r#"
        INSERT INTO meals (id, food_name, calories, goal)
        VALUES ($1, $2, $3, $4)
        RETURNING id, food_name, calories, goal, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&meal.food_name)
    .bind(meal.calories)
    .bind(&meal.goal)
    .fetch_one(db)
    .await
    .context("insert meal")?;
    Ok(row)
}

pub async fn list_recent(db: &PgPool, limit: i64) -> anyhow::Result<Vec<Meal>> {
    let rows = sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, food_name, calories, goal, created_at
          FROM meals
         ORDER BY created_at DESC
         LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await
    .context("list recent meals")?;
    Ok(rows)
}

pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM meals")
        .fetch_one(db)
        .await
        .context("count meals")?;
    Ok(n)
}

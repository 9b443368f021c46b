use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFood {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

pub async fn insert(db: &PgPool, food: &NewFood) -> anyhow::Result<Food> {
    let row = sqlx::query_as::<_, Food>(
        r#"
        INSERT INTO foods (id, name, calories, protein, carbs, fat)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, calories, protein, carbs, fat, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&food.name)
    .bind(food.calories)
    .bind(food.protein)
    .bind(food.carbs)
    .bind(food.fat)
    .fetch_one(db)
    .await
    .context("insert food")?;
    Ok(row)
}

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Food>> {
    let rows = sqlx::query_as::<_, Food>(
        r#"
        SELECT id, name, calories, protein, carbs, fat, created_at
          FROM foods
         ORDER BY created_at ASC
        "#,
    )
    .fetch_all(db)
    .await
    .context("list foods")?;
    Ok(rows)
}

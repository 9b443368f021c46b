use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::feedback::repo::{self as feedback_repo, FeedbackNote};
use crate::foods::repo::{self as foods_repo, Food, NewFood};
use crate::meals::repo::{self as meals_repo, Meal, NewMeal};

/// Everything the handlers persist. Records are append-only.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_meal(&self, meal: NewMeal) -> anyhow::Result<Meal>;
    /// Newest first, at most `limit` rows.
    async fn recent_meals(&self, limit: i64) -> anyhow::Result<Vec<Meal>>;
    async fn count_meals(&self) -> anyhow::Result<i64>;

    async fn insert_feedback(&self, note: &str) -> anyhow::Result<FeedbackNote>;

    async fn insert_food(&self, food: NewFood) -> anyhow::Result<Food>;
    async fn list_foods(&self) -> anyhow::Result<Vec<Food>>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_meal(&self, meal: NewMeal) -> anyhow::Result<Meal> {
        meals_repo::insert(&self.pool, &meal).await
    }

    async fn recent_meals(&self, limit: i64) -> anyhow::Result<Vec<Meal>> {
        meals_repo::list_recent(&self.pool, limit).await
    }

    async fn count_meals(&self) -> anyhow::Result<i64> {
        meals_repo::count(&self.pool).await
    }

    async fn insert_feedback(&self, note: &str) -> anyhow::Result<FeedbackNote> {
        feedback_repo::insert(&self.pool, note).await
    }

    async fn insert_food(&self, food: NewFood) -> anyhow::Result<Food> {
        foods_repo::insert(&self.pool, &food).await
    }

    async fn list_foods(&self) -> anyhow::Result<Vec<Food>> {
        foods_repo::list_all(&self.pool).await
    }
}

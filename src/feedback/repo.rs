use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedbackNote {
    pub id: Uuid,
    pub note: String,
    pub created_at: OffsetDateTime,
}

pub async fn insert(db: &PgPool, note: &str) -> anyhow::Result<FeedbackNote> {
    let row = sqlx::query_as::<_, FeedbackNote>(
        r#"
        INSERT INTO feedback (id, note)
        VALUES ($1, $2)
        RETURNING id, note, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(note)
    .fetch_one(db)
    .await
    .context("insert feedback")?;
    Ok(row)
}

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use typed_builder::TypedBuilder;

use crate::common::{NoteId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct Note {
    #[builder(default = NoteId::new())]
    pub id: NoteId,
    pub owner_id: UserId,
    pub title: String,
    pub content: String,
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Note Queries
// =============================================================================

impl Note {
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO notes (id, owner_id, title, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.owner_id)
        .bind(&self.title)
        .bind(&self.content)
        .bind(self.created_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: NoteId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// All notes owned by `owner_id`, newest first.
    pub async fn find_for_owner(owner_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM notes WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Returns whether a row was removed.
    pub async fn delete(id: NoteId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}

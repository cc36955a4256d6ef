use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use typed_builder::TypedBuilder;

use crate::common::UserId;

/// A registered account. Created once by signup, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct User {
    #[builder(default = UserId::new())]
    pub id: UserId,
    pub name: String,
    /// Always stored normalized (trimmed, lower-case).
    pub email: String,
    pub date_of_birth: NaiveDate,
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
}

/// Public view of a user returned alongside their notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

// =============================================================================
// SQL Queries
// =============================================================================

impl User {
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert the user unless the email is taken.
    ///
    /// Returns `None` when another row already owns the email.
    pub async fn insert(&self, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (id, name, email, date_of_birth, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.email)
        .bind(self.date_of_birth)
        .bind(self.created_at)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}

// PostgreSQL-backed storage. SQL lives on the models; this only adapts them to the store traits.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::{BaseNoteStore, BaseUserStore};
use crate::common::{NoteId, UserId};
use crate::domains::notes::models::Note;
use crate::domains::users::models::User;

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseUserStore for PostgresStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        User::find_by_id(id, &self.pool).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        User::find_by_email(email, &self.pool).await
    }

    async fn insert(&self, user: User) -> Result<Option<User>> {
        user.insert(&self.pool).await
    }
}

#[async_trait]
impl BaseNoteStore for PostgresStore {
    async fn list_for_owner(&self, owner_id: UserId) -> Result<Vec<Note>> {
        Note::find_for_owner(owner_id, &self.pool).await
    }

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>> {
        Note::find_by_id(id, &self.pool).await
    }

    async fn insert(&self, note: Note) -> Result<Note> {
        note.insert(&self.pool).await
    }

    async fn delete(&self, id: NoteId) -> Result<bool> {
        Note::delete(id, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// In-process storage used when no DATABASE_URL is configured, and by tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{BaseNoteStore, BaseUserStore};
use crate::common::{NoteId, UserId};
use crate::domains::notes::models::Note;
use crate::domains::users::models::User;

/// Users and notes held in memory. Cloning shares the same maps.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    notes: Arc<RwLock<HashMap<NoteId, Note>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn note_count(&self) -> usize {
        self.notes.read().await.len()
    }
}

#[async_trait]
impl BaseUserStore for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn insert(&self, user: User) -> Result<Option<User>> {
        // Uniqueness check and insert under one write guard
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Ok(None);
        }
        users.insert(user.id, user.clone());
        Ok(Some(user))
    }
}

#[async_trait]
impl BaseNoteStore for InMemoryStore {
    async fn list_for_owner(&self, owner_id: UserId) -> Result<Vec<Note>> {
        let notes = self.notes.read().await;
        let mut owned: Vec<Note> = notes
            .values()
            .filter(|note| note.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(owned)
    }

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>> {
        Ok(self.notes.read().await.get(&id).cloned())
    }

    async fn insert(&self, note: Note) -> Result<Note> {
        self.notes.write().await.insert(note.id, note.clone());
        Ok(note)
    }

    async fn delete(&self, id: NoteId) -> Result<bool> {
        Ok(self.notes.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

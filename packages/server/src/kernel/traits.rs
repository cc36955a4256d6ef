// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Auth and notes rules live in the domain actions that call these traits.
//
// Naming convention: Base* for trait names (e.g., BaseMailer, BaseNoteStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{NoteId, UserId};
use crate::domains::notes::models::Note;
use crate::domains::users::models::User;

// =============================================================================
// Mailer Trait (Infrastructure - OTP delivery)
// =============================================================================

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Deliver a one-time passcode to an email address
    async fn send_otp(&self, email: &str, code: &str, valid_for_minutes: i64) -> Result<()>;
}

// =============================================================================
// User Store Trait (Infrastructure - account persistence)
// =============================================================================

#[async_trait]
pub trait BaseUserStore: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Lookup by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Insert a user, returning `None` if the email is already registered
    async fn insert(&self, user: User) -> Result<Option<User>>;
}

// =============================================================================
// Note Store Trait (Infrastructure - note persistence)
// =============================================================================

#[async_trait]
pub trait BaseNoteStore: Send + Sync {
    /// Notes owned by `owner_id`, newest first
    async fn list_for_owner(&self, owner_id: UserId) -> Result<Vec<Note>>;

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>>;

    async fn insert(&self, note: Note) -> Result<Note>;

    /// Remove a note, returning whether a record existed
    async fn delete(&self, id: NoteId) -> Result<bool>;

    /// Cheap liveness probe for the health endpoint
    async fn ping(&self) -> Result<()>;
}

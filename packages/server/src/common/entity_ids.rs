//! Typed ids for the persisted entities.

pub use super::id::Id;

/// Marker type for registered users.
pub struct User;

/// Marker type for notes.
pub struct Note;

pub type UserId = Id<User>;
pub type NoteId = Id<Note>;

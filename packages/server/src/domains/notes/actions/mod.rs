//! Notes domain actions. Every action is scoped to the caller's user id.

mod create_note;
mod delete_note;
mod list_notes;

pub use create_note::create_note;
pub use delete_note::delete_note;
pub use list_notes::{list_notes, notes_overview, NotesOverview};

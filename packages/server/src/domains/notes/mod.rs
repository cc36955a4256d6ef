//! Notes domain - per-owner text notes behind the session gate.

pub mod actions;
pub mod data;
pub mod errors;
pub mod models;

pub use data::NoteData;
pub use errors::NoteError;
pub use models::Note;

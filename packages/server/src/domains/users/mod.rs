//! Users domain - registered accounts created by signup verification.

pub mod models;

pub use models::{User, UserProfile};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("{0}")]
    Validation(String),

    #[error("Note not found")]
    NotFound,

    #[error("You can only delete your own notes")]
    Forbidden,

    #[error("User not found")]
    UserNotFound,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

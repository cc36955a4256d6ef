use serde::Serialize;

use crate::common::UserId;
use crate::domains::notes::data::NoteData;
use crate::domains::notes::errors::NoteError;
use crate::domains::users::models::UserProfile;
use crate::kernel::ServerDeps;

/// The caller's notes together with their profile.
#[derive(Debug, Clone, Serialize)]
pub struct NotesOverview {
    pub notes: Vec<NoteData>,
    pub user: UserProfile,
}

/// Notes owned by `owner_id`, newest first.
pub async fn list_notes(owner_id: UserId, deps: &ServerDeps) -> Result<Vec<NoteData>, NoteError> {
    let notes = deps.notes.list_for_owner(owner_id).await?;
    Ok(notes.into_iter().map(NoteData::from).collect())
}

pub async fn notes_overview(owner_id: UserId, deps: &ServerDeps) -> Result<NotesOverview, NoteError> {
    let user = deps
        .users
        .find_by_id(owner_id)
        .await?
        .ok_or(NoteError::UserNotFound)?;
    let notes = list_notes(owner_id, deps).await?;

    Ok(NotesOverview {
        notes,
        user: UserProfile::from(&user),
    })
}

use tracing::{info, warn};

use crate::common::{NoteId, UserId};
use crate::domains::notes::errors::NoteError;
use crate::kernel::ServerDeps;

/// Delete a note owned by `owner_id`.
pub async fn delete_note(owner_id: UserId, note_id: NoteId, deps: &ServerDeps) -> Result<(), NoteError> {
    let note = deps
        .notes
        .find_by_id(note_id)
        .await?
        .ok_or(NoteError::NotFound)?;

    if note.owner_id != owner_id {
        warn!(note_id = %note_id, owner_id = %owner_id, "Refused to delete another user's note");
        return Err(NoteError::Forbidden);
    }

    if !deps.notes.delete(note_id).await? {
        return Err(NoteError::NotFound);
    }

    info!(note_id = %note_id, "Note deleted");
    Ok(())
}

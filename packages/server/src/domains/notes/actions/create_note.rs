use tracing::info;

use crate::common::UserId;
use crate::domains::notes::data::NoteData;
use crate::domains::notes::errors::NoteError;
use crate::domains::notes::models::Note;
use crate::kernel::ServerDeps;

pub async fn create_note(
    owner_id: UserId,
    title: &str,
    content: &str,
    deps: &ServerDeps,
) -> Result<NoteData, NoteError> {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(NoteError::Validation(
            "Title and content are required".to_string(),
        ));
    }

    let note = Note::builder()
        .owner_id(owner_id)
        .title(title)
        .content(content)
        .build();
    let note = deps.notes.insert(note).await?;

    info!(note_id = %note.id, owner_id = %owner_id, "Note created");
    Ok(NoteData::from(note))
}

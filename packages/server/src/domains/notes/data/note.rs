use crate::domains::notes::models::Note;
use serde::{Deserialize, Serialize};

/// Wire shape of a note. `_id` is the field name the web client keys on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteData {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<Note> for NoteData {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.to_string(),
            title: note.title,
            content: note.content,
            created_at: note.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UserId;

    #[test]
    fn test_serializes_with_client_field_names() {
        let note = Note::builder()
            .owner_id(UserId::new())
            .title("Groceries")
            .content("eggs, milk")
            .build();
        let id = note.id.to_string();

        let json = serde_json::to_value(NoteData::from(note)).unwrap();
        assert_eq!(json["_id"], id);
        assert_eq!(json["title"], "Groceries");
        assert_eq!(json["content"], "eggs, milk");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("owner_id").is_none());
    }
}

//! Note endpoints. All of them sit behind `require_auth`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::common::NoteId;
use crate::domains::notes::actions::{self, NotesOverview};
use crate::domains::notes::NoteData;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub note: NoteData,
}

/// GET /notes/me
pub async fn my_notes_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<NotesOverview>, ApiError> {
    let overview = actions::notes_overview(user.user_id, &state.deps).await?;
    Ok(Json(overview))
}

/// POST /notes
pub async fn create_note_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NoteResponse>), ApiError> {
    let Json(request) = payload?;

    let note = actions::create_note(user.user_id, &request.title, &request.content, &state.deps)
        .await?;

    Ok((StatusCode::CREATED, Json(NoteResponse { note })))
}

/// DELETE /notes/:id
pub async fn delete_note_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let note_id = NoteId::parse(&id).map_err(|_| ApiError::bad_request("Invalid note id"))?;

    actions::delete_note(user.user_id, note_id, &state.deps).await?;

    Ok(StatusCode::NO_CONTENT)
}

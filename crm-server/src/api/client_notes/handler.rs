//! Client Note API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use serde_json::json;
use shared::models::ClientNote;
use shared::{ApiResponse, AppResult};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::client_note;
use crate::validation::{Payload, note::note_text};

/// GET /clients/{id}/notes - newest first
pub async fn list(
    State(state): State<ServerState>,
    Path(client_id): Path<i64>,
) -> AppResult<Json<Vec<ClientNote>>> {
    let notes = client_note::find_by_client(&state.pool, client_id).await?;
    Ok(Json(notes))
}

/// POST /clients/{id}/notes
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(client_id): Path<i64>,
    body: Payload,
) -> AppResult<(StatusCode, Json<ClientNote>)> {
    client_note::resolve(&state.pool, client_id, None).await?;
    let text = note_text(&body)?;
    let note = client_note::create(&state.pool, client_id, text).await?;

    tracing::info!(user_id = %current_user.id, client_id, note_id = note.id, "Client note created");
    Ok((StatusCode::CREATED, Json(note)))
}

/// PATCH /clients/{id}/notes/{note_id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path((client_id, note_id)): Path<(i64, i64)>,
    body: Payload,
) -> AppResult<Json<ClientNote>> {
    client_note::resolve(&state.pool, client_id, Some(note_id)).await?;
    let text = note_text(&body)?;
    let note = client_note::update(&state.pool, client_id, note_id, text).await?;

    tracing::info!(user_id = %current_user.id, client_id, note_id, "Client note updated");
    Ok(Json(note))
}

/// DELETE /clients/{id}/notes/{note_id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path((client_id, note_id)): Path<(i64, i64)>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    client_note::delete(&state.pool, client_id, note_id).await?;

    tracing::info!(user_id = %current_user.id, client_id, note_id, "Client note deleted");
    Ok(ApiResponse::success_with_message(
        "Note deleted",
        json!({ "id": note_id }),
    ))
}

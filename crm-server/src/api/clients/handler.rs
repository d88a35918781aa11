//! Client API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use http::StatusCode;
use serde_json::json;
use shared::models::{Client, ClientDetails};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::client;
use crate::export::{client_detail_lines, csv_response};
use crate::validation::{self, Payload, client::ClientQuery};

/// GET /clients - list clients, optionally filtered
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ClientQuery>,
) -> AppResult<Json<Vec<Client>>> {
    let clients = client::find_all(&state.pool, &query.into_filter()).await?;
    Ok(Json(clients))
}

/// GET /clients/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Client>> {
    let client = client::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ClientNotFound))?;
    Ok(Json(client))
}

/// POST /clients
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    body: Payload,
) -> AppResult<(StatusCode, Json<Client>)> {
    let data = validation::client::create(&body)?;
    let client = client::create(&state.pool, data).await?;

    tracing::info!(user_id = %current_user.id, client_id = client.id, "Client created");
    Ok((StatusCode::CREATED, Json(client)))
}

/// PATCH /clients/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    body: Payload,
) -> AppResult<Json<Client>> {
    let data = validation::client::update(&body)?;
    let client = client::update(&state.pool, id, data).await?;

    tracing::info!(user_id = %current_user.id, client_id = id, "Client updated");
    Ok(Json(client))
}

/// DELETE /clients/{id} - removes the client and everything it owns
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let removed = client::delete(&state.pool, id).await?;

    tracing::info!(
        user_id = %current_user.id,
        client_id = id,
        trips = removed.trips,
        invoices = removed.invoices,
        payments = removed.payments,
        notes = removed.notes,
        "Client deleted"
    );
    Ok(ApiResponse::success_with_message(
        "Client deleted",
        json!({ "id": id, "removed": removed }),
    ))
}

async fn load_details(state: &ServerState, id: i64) -> AppResult<ClientDetails> {
    client::find_details(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ClientNotFound))
}

/// GET /clients/{id}/details - client with notes and trips → invoices → payments
pub async fn details(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ClientDetails>> {
    Ok(Json(load_details(&state, id).await?))
}

/// GET /clients/{id}/details/export - the same graph as CSV
pub async fn export_details(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let details = load_details(&state, id).await?;
    csv_response(&format!("client_{id}_details"), &client_detail_lines(&details))
}

//! Trip API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde_json::json;
use shared::models::Trip;
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::trip;
use crate::validation::{self, Payload, trip::TripQuery};

/// GET /trips - filters: `destination` (substring), `client_id`, `start_date` (on or after)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TripQuery>,
) -> AppResult<Json<Vec<Trip>>> {
    let filter = query.into_filter()?;
    let trips = trip::find_all(&state.pool, &filter).await?;
    Ok(Json(trips))
}

/// GET /trips/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Trip>> {
    let trip = trip::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TripNotFound))?;
    Ok(Json(trip))
}

/// POST /trips
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    body: Payload,
) -> AppResult<(StatusCode, Json<Trip>)> {
    let data = validation::trip::create(&body)?;
    let trip = trip::create(&state.pool, data).await?;

    tracing::info!(user_id = %current_user.id, trip_id = trip.id, "Trip created");
    Ok((StatusCode::CREATED, Json(trip)))
}

/// PATCH /trips/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    body: Payload,
) -> AppResult<Json<Trip>> {
    let data = validation::trip::update(&body)?;
    let trip = trip::update(&state.pool, id, data).await?;

    tracing::info!(user_id = %current_user.id, trip_id = id, "Trip updated");
    Ok(Json(trip))
}

/// DELETE /trips/{id} - removes its invoices and their payments
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    trip::delete(&state.pool, id).await?;

    tracing::info!(user_id = %current_user.id, trip_id = id, "Trip deleted");
    Ok(ApiResponse::success_with_message(
        "Trip deleted",
        json!({ "id": id }),
    ))
}

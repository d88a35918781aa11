//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde_json::json;
use shared::models::Invoice;
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::invoice;
use crate::validation::{self, Payload, invoice::InvoiceQuery};

/// GET /invoices - filters: `trip_id`, `status`
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<InvoiceQuery>,
) -> AppResult<Json<Vec<Invoice>>> {
    let filter = query.into_filter()?;
    let invoices = invoice::find_all(&state.pool, &filter).await?;
    Ok(Json(invoices))
}

/// GET /invoices/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Invoice>> {
    let invoice = invoice::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::InvoiceNotFound))?;
    Ok(Json(invoice))
}

/// POST /invoices
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    body: Payload,
) -> AppResult<(StatusCode, Json<Invoice>)> {
    let data = validation::invoice::create(&body)?;
    let invoice = invoice::create(&state.pool, data).await?;

    tracing::info!(user_id = %current_user.id, invoice_id = invoice.id, "Invoice created");
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// PATCH /invoices/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    body: Payload,
) -> AppResult<Json<Invoice>> {
    let data = validation::invoice::update(&body)?;
    let invoice = invoice::update(&state.pool, id, data).await?;

    tracing::info!(user_id = %current_user.id, invoice_id = id, "Invoice updated");
    Ok(Json(invoice))
}

/// DELETE /invoices/{id} - removes its payments
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    invoice::delete(&state.pool, id).await?;

    tracing::info!(user_id = %current_user.id, invoice_id = id, "Invoice deleted");
    Ok(ApiResponse::success_with_message(
        "Invoice deleted",
        json!({ "id": id }),
    ))
}

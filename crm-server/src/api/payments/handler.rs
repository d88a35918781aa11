//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde_json::json;
use shared::models::Payment;
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::payment;
use crate::validation::{self, Payload, payment::PaymentQuery};

/// GET /payments - filters: `invoice_id`
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PaymentQuery>,
) -> AppResult<Json<Vec<Payment>>> {
    let filter = query.into_filter()?;
    let payments = payment::find_all(&state.pool, &filter).await?;
    Ok(Json(payments))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Payment>> {
    let payment = payment::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound))?;
    Ok(Json(payment))
}

/// POST /payments
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    body: Payload,
) -> AppResult<(StatusCode, Json<Payment>)> {
    let data = validation::payment::create(&body)?;
    let payment = payment::create(&state.pool, data).await?;

    tracing::info!(user_id = %current_user.id, payment_id = payment.id, "Payment created");
    Ok((StatusCode::CREATED, Json(payment)))
}

/// PATCH /payments/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    body: Payload,
) -> AppResult<Json<Payment>> {
    let data = validation::payment::update(&body)?;
    let payment = payment::update(&state.pool, id, data).await?;

    tracing::info!(user_id = %current_user.id, payment_id = id, "Payment updated");
    Ok(Json(payment))
}

/// DELETE /payments/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    payment::delete(&state.pool, id).await?;

    tracing::info!(user_id = %current_user.id, payment_id = id, "Payment deleted");
    Ok(ApiResponse::success_with_message(
        "Payment deleted",
        json!({ "id": id }),
    ))
}

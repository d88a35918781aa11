//! Report API Handlers

use axum::{
    Json,
    extract::{Query, State},
    response::Response,
};
use chrono::Utc;
use shared::AppResult;
use shared::models::{ClientRevenue, InvoiceSummary, MonthlyRevenue, UnpaidInvoice};

use crate::core::ServerState;
use crate::export::{csv_response, summary_lines};
use crate::reports;
use crate::validation::report::MonthlyRevenueQuery;

/// GET /reports/revenue-by-client - largest total first
pub async fn revenue_by_client(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ClientRevenue>>> {
    Ok(Json(reports::revenue_by_client(&state.pool).await?))
}

pub async fn export_revenue_by_client(State(state): State<ServerState>) -> AppResult<Response> {
    let rows = reports::revenue_by_client(&state.pool).await?;
    csv_response("revenue_by_client", &rows)
}

/// GET /reports/monthly-revenue - filters: `year`, `destination`
pub async fn monthly_revenue(
    State(state): State<ServerState>,
    Query(query): Query<MonthlyRevenueQuery>,
) -> AppResult<Json<Vec<MonthlyRevenue>>> {
    let filter = query.into_filter()?;
    Ok(Json(reports::monthly_revenue(&state.pool, &filter).await?))
}

pub async fn export_monthly_revenue(
    State(state): State<ServerState>,
    Query(query): Query<MonthlyRevenueQuery>,
) -> AppResult<Response> {
    let filter = query.into_filter()?;
    let rows = reports::monthly_revenue(&state.pool, &filter).await?;
    csv_response("monthly_revenue", &rows)
}

/// GET /reports/unpaid-invoices - every invoice not marked Paid
pub async fn unpaid_invoices(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<UnpaidInvoice>>> {
    Ok(Json(reports::unpaid_invoices(&state.pool).await?))
}

pub async fn export_unpaid_invoices(State(state): State<ServerState>) -> AppResult<Response> {
    let rows = reports::unpaid_invoices(&state.pool).await?;
    csv_response("unpaid_invoices", &rows)
}

/// GET /reports/invoice-summary - paid / overdue / pending as of today (UTC)
pub async fn invoice_summary(
    State(state): State<ServerState>,
) -> AppResult<Json<InvoiceSummary>> {
    let today = Utc::now().date_naive();
    Ok(Json(reports::invoice_summary(&state.pool, today).await?))
}

pub async fn export_invoice_summary(State(state): State<ServerState>) -> AppResult<Response> {
    let today = Utc::now().date_naive();
    let summary = reports::invoice_summary(&state.pool, today).await?;
    csv_response("invoice_summary", &summary_lines(&summary))
}

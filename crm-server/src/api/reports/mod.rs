//! Report API (admin, analyst)
//!
//! Each report has an `/export` twin returning the same rows as CSV.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::permissions::REPORT_VIEWERS;
use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/revenue-by-client", get(handler::revenue_by_client))
        .route("/revenue-by-client/export", get(handler::export_revenue_by_client))
        .route("/monthly-revenue", get(handler::monthly_revenue))
        .route("/monthly-revenue/export", get(handler::export_monthly_revenue))
        .route("/unpaid-invoices", get(handler::unpaid_invoices))
        .route("/unpaid-invoices/export", get(handler::export_unpaid_invoices))
        .route("/invoice-summary", get(handler::invoice_summary))
        .route("/invoice-summary/export", get(handler::export_invoice_summary))
        .route_layer(middleware::from_fn(require_roles(REPORT_VIEWERS)))
}

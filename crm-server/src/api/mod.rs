//! HTTP surface
//!
//! Public routes (`/health`, `/register`, `/login`, `/roles`) sit beside a
//! protected router whose every route passes [`require_auth`] before any
//! role guard, so a missing token is always 401 and never 403.

pub mod auth;
pub mod client_notes;
pub mod clients;
pub mod health;
pub mod invoices;
pub mod payments;
pub mod reports;
pub mod trips;

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Routes that need a valid token, without the auth layer
pub fn protected_router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(clients::router())
        .merge(trips::router())
        .merge(invoices::router())
        .merge(payments::router())
        .merge(reports::router())
}

/// Fully layered application, used by the server and by tests
pub fn build_app(state: ServerState) -> Router {
    let timeout = state.config.request_timeout;

    let protected = protected_router().route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_auth,
    ));

    Router::new()
        .merge(health::router())
        .merge(auth::public_router())
        .merge(protected)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::REQUEST_TIMEOUT,
            timeout.max(Duration::from_millis(1)),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

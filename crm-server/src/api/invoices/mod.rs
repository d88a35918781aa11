//! Invoice API
//!
//! | Path | Method | Roles |
//! |------|--------|-------|
//! | /invoices | GET | admin, agent, analyst |
//! | /invoices/{id} | GET | admin, agent, analyst |
//! | /invoices | POST | admin, agent |
//! | /invoices/{id} | PATCH | admin, agent |
//! | /invoices/{id} | DELETE | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::permissions::{ADMIN, READERS, WRITERS};
use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/invoices", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route_layer(middleware::from_fn(require_roles(READERS)));

    let write_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", patch(handler::update))
        .route_layer(middleware::from_fn(require_roles(WRITERS)));

    let admin_routes = Router::new()
        .route("/{id}", axum::routing::delete(handler::delete))
        .route_layer(middleware::from_fn(require_roles(ADMIN)));

    read_routes.merge(write_routes).merge(admin_routes)
}

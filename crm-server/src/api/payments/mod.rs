//! Payment API
//!
//! | Path | Method | Roles |
//! |------|--------|-------|
//! | /payments | GET | admin, agent, analyst |
//! | /payments/{id} | GET | admin, agent, analyst |
//! | /payments | POST | admin, agent |
//! | /payments/{id} | PATCH | admin, agent |
//! | /payments/{id} | DELETE | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::permissions::{ADMIN, READERS, WRITERS};
use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/payments", routes())
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

//! Client API
//!
//! | Path | Method | Roles |
//! |------|--------|-------|
//! | /clients | GET | admin, agent, analyst |
//! | /clients | POST | admin, agent |
//! | /clients/{id} | GET, PATCH | admin, agent |
//! | /clients/{id} | DELETE | admin |
//! | /clients/{id}/details | GET | admin, agent, analyst |
//! | /clients/{id}/details/export | GET | admin, agent, analyst |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::permissions::{ADMIN, READERS, WRITERS};
use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/clients", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}/details", get(handler::details))
        .route("/{id}/details/export", get(handler::export_details))
        .route_layer(middleware::from_fn(require_roles(READERS)));

    let write_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id).patch(handler::update))
        .route_layer(middleware::from_fn(require_roles(WRITERS)));

    let admin_routes = Router::new()
        .route("/{id}", axum::routing::delete(handler::delete))
        .route_layer(middleware::from_fn(require_roles(ADMIN)));

    read_routes
        .merge(write_routes)
        .merge(admin_routes)
        .merge(super::client_notes::routes())
}

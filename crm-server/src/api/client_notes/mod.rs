//! Client Note API
//!
//! Nested under `/clients/{id}/notes`; the owning client is always resolved
//! first, so a missing client is reported even when the note id is bogus.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::permissions::{ADMIN, READERS, WRITERS};
use crate::auth::require_roles;
use crate::core::ServerState;

/// Routes relative to `/clients`
pub fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/{id}/notes", get(handler::list))
        .route_layer(middleware::from_fn(require_roles(READERS)));

    let write_routes = Router::new()
        .route("/{id}/notes", axum::routing::post(handler::create))
        .route("/{id}/notes/{note_id}", axum::routing::patch(handler::update))
        .route_layer(middleware::from_fn(require_roles(WRITERS)));

    let admin_routes = Router::new()
        .route("/{id}/notes/{note_id}", axum::routing::delete(handler::delete))
        .route_layer(middleware::from_fn(require_roles(ADMIN)));

    read_routes.merge(write_routes).merge(admin_routes)
}

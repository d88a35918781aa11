//! Auth API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /register | POST | none |
//! | /login | POST | none |
//! | /roles | GET | none |
//! | /me | GET | any valid token |
//! | /users | GET | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::permissions::ADMIN;
use crate::auth::require_roles;
use crate::core::ServerState;

/// Routes reachable without a token
pub fn public_router() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/roles", get(handler::roles))
}

/// Routes behind `require_auth`
pub fn router() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/users", get(handler::list_users))
        .route_layer(middleware::from_fn(require_roles(ADMIN)));

    Router::new().route("/me", get(handler::me)).merge(admin_routes)
}

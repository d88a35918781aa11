//! Authentication and role middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::AppError;
use shared::models::Role;

use crate::auth::{CurrentUser, JwtError, JwtService, authorize};
use crate::core::ServerState;
use crate::security_log;

/// Require a valid `Authorization: Bearer <token>` header
///
/// On success the resolved [`CurrentUser`] is inserted into the request
/// extensions. Missing header → 401 NotAuthenticated, expired token → 401
/// TokenExpired, anything else → 401 TokenInvalid.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = req.uri().to_string());
            return Err(AppError::not_authenticated());
        }
    };

    match state.get_jwt_service().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = req.uri().to_string()
            );
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Role guard, layered inside [`require_auth`]
///
/// ```ignore
/// Router::new()
///     .route("/clients/{id}", delete(handler::delete))
///     .route_layer(middleware::from_fn(require_roles(permissions::ADMIN)));
/// ```
pub fn require_roles(
    allowed: &'static [Role],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::not_authenticated)?;

            if let Err(e) = authorize(user, allowed) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id.clone(),
                    username = user.username.clone(),
                    role = user.role.as_str(),
                    path = req.uri().path().to_string()
                );
                return Err(e);
            }

            Ok(next.run(req).await)
        })
    }
}

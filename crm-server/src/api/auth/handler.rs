//! Auth API Handlers

use axum::{Json, extract::State};
use http::StatusCode;
use shared::models::{LoginResponse, MeResponse, Role, User};
use shared::{AppError, AppResult};

use crate::auth::{CurrentUser, hash_password_blocking, verify_password_blocking};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::validation::{self, Payload};

/// POST /register
pub async fn register(
    State(state): State<ServerState>,
    body: Payload,
) -> AppResult<(StatusCode, Json<User>)> {
    let req = validation::auth::register(&body)?;
    let hash = hash_password_blocking(req.password.clone()).await?;

    let user = match user::create(&state.pool, &req.username, &hash, req.role).await {
        Ok(user) => user,
        Err(e) => {
            security_log!("WARN", "register_failed", username = req.username.clone(), error = e.to_string());
            return Err(e.into());
        }
    };

    security_log!(
        "INFO",
        "user_registered",
        user_id = user.id,
        username = user.username.clone(),
        role = user.role.as_str()
    );
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /login
///
/// Unknown user and wrong password produce the same response.
pub async fn login(
    State(state): State<ServerState>,
    body: Payload,
) -> AppResult<Json<LoginResponse>> {
    let req = validation::auth::login(&body)?;

    let record = match user::find_by_username(&state.pool, &req.username).await? {
        Some(r) => verify_password_blocking(req.password.clone(), r.password_hash.clone())
            .await?
            .then_some(r),
        None => None,
    };
    let Some(record) = record else {
        security_log!("WARN", "login_failed", username = req.username.clone());
        return Err(AppError::invalid_credentials());
    };

    let user = User::from(record);
    let jwt = state.get_jwt_service();
    let access_token = jwt
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    security_log!(
        "INFO",
        "login_success",
        user_id = user.id,
        username = user.username.clone()
    );
    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: jwt.expires_in(),
    }))
}

/// GET /me
pub async fn me(current_user: CurrentUser) -> Json<MeResponse> {
    Json(MeResponse::from(current_user))
}

/// GET /users - never exposes password hashes
pub async fn list_users(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(user::find_all(&state.pool).await?))
}

/// GET /roles
pub async fn roles() -> Json<Vec<&'static str>> {
    Json(Role::allowed())
}

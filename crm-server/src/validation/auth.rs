//! Register / login payloads

use serde_json::Value;
use shared::models::Role;
use shared::{AppError, AppResult, ErrorCode};

use super::{FieldReader, Payload, required};

const REGISTER_FIELDS: &[&str] = &["username", "password", "role"];
const LOGIN_FIELDS: &[&str] = &["username", "password"];

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Passwords are taken verbatim; only emptiness is rejected
fn password(r: &mut FieldReader<'_>, body: &Payload) -> Option<String> {
    match body.get("password") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        // let the reader classify null / blank / wrong type
        _ => r.text("password"),
    }
}

/// Register a user; `role` defaults to `agent`
pub fn register(body: &Payload) -> AppResult<RegisterRequest> {
    body.reject_unknown(REGISTER_FIELDS)?;
    body.require(LOGIN_FIELDS)?;

    let mut r = FieldReader::new(body);
    let username = r.text("username");
    let password = password(&mut r, body);
    let role = match body.get("role") {
        None | Some(Value::Null) => Some(Role::Agent),
        Some(_) => r.one_of("role", ErrorCode::InvalidRole, Role::allowed(), Role::parse),
    };
    r.finish()?;

    Ok(RegisterRequest {
        username: required(username, "username")?,
        password: required(password, "password")?,
        role: required(role, "role")?,
    })
}

/// Login never reveals which of the two fields was wrong
pub fn login(body: &Payload) -> AppResult<LoginRequest> {
    body.require(LOGIN_FIELDS)?;
    let (Some(Value::String(username)), Some(Value::String(password))) =
        (body.get("username"), body.get("password"))
    else {
        return Err(AppError::invalid_credentials());
    };
    Ok(LoginRequest {
        username: username.trim().to_string(),
        password: password.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::payload;
    use serde_json::json;

    #[test]
    fn test_register_defaults_role() {
        let req = register(&payload(json!({"username": "mia", "password": " s3cret "}))).unwrap();
        assert_eq!(req.role, Role::Agent);
        // surrounding whitespace is part of the password
        assert_eq!(req.password, " s3cret ");
    }

    #[test]
    fn test_register_invalid_role() {
        let err = register(&payload(json!({
            "username": "mia", "password": "pw", "role": "superuser"
        })))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRole);
        assert_eq!(err.details.unwrap()["allowed"], json!(["admin", "agent", "analyst"]));
    }

    #[test]
    fn test_register_missing_fields_aggregated() {
        let err = register(&payload(json!({}))).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.details.unwrap()["fields"], json!(["username", "password"]));
    }

    #[test]
    fn test_login_wrong_types_are_bad_credentials() {
        let err = login(&payload(json!({"username": 1, "password": "x"}))).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        assert!(login(&payload(json!({"username": "a", "password": "b"}))).is_ok());
    }
}

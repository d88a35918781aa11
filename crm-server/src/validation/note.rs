//! Client note payloads

use serde_json::Value;
use shared::{AppError, AppResult, ErrorCode};

use super::Payload;

pub const FIELDS: &[&str] = &["note"];

fn empty() -> AppError {
    AppError::with_message(ErrorCode::NoteEmpty, "Note cannot be empty")
        .with_detail("fields", vec!["note"])
}

/// Note text, trimmed; create and update share the same shape
pub fn note_text(body: &Payload) -> AppResult<String> {
    body.reject_unknown(FIELDS)?;
    match body.get("note") {
        None | Some(Value::Null) => Err(empty()),
        Some(Value::String(s)) if s.trim().is_empty() => Err(empty()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(_) => Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            "Invalid fields: note (expected a string)",
        )
        .with_detail("fields", vec!["note"])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::payload;
    use serde_json::json;

    #[test]
    fn test_note_text() {
        assert_eq!(
            note_text(&payload(json!({"note": "  call back Friday "}))).unwrap(),
            "call back Friday"
        );
        for body in [json!({}), json!({"note": null}), json!({"note": "\n\t "})] {
            assert_eq!(note_text(&payload(body)).unwrap_err().code, ErrorCode::NoteEmpty);
        }
        assert_eq!(
            note_text(&payload(json!({"note": 4}))).unwrap_err().code,
            ErrorCode::InvalidFormat
        );
        assert_eq!(
            note_text(&payload(json!({"note": "x", "pinned": true})))
                .unwrap_err()
                .code,
            ErrorCode::UnknownField
        );
    }
}

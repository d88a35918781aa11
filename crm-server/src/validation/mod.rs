//! Validation Layer
//!
//! Request bodies arrive as raw JSON objects ([`Payload`]) and are turned into
//! typed create/update payloads by the per-entity modules. Checks run in a
//! fixed order and each stage reports every offending field at once:
//!
//! 1. keys outside the entity whitelist → `UnknownField`
//! 2. absent or `null` mandatory fields (create only) → `RequiredField`
//! 3. type coercion, blank text, enumerated values → one aggregated error
//!
//! Nothing reaches the store until all three stages pass.

pub mod auth;
pub mod client;
pub mod invoice;
pub mod note;
pub mod payment;
pub mod report;
pub mod trip;

use axum::Json;
use axum::extract::{FromRequest, Request};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use shared::{AppError, AppResult, ErrorCode};

/// Calendar date wire format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// JSON object request body
#[derive(Debug, Clone, Default)]
pub struct Payload(pub Map<String, Value>);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_request(format!("Invalid JSON body: {}", e.body_text())))?;
        match value {
            Value::Object(map) => Ok(Payload(map)),
            _ => Err(AppError::invalid_request("Request body must be a JSON object")),
        }
    }
}

impl Payload {
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Reject any key outside `allowed`, naming all of them
    pub fn reject_unknown(&self, allowed: &[&str]) -> AppResult<()> {
        let unknown: Vec<&str> = self
            .0
            .keys()
            .map(String::as_str)
            .filter(|k| !allowed.contains(k))
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }
        Err(AppError::with_message(
            ErrorCode::UnknownField,
            format!("Unknown or unauthorized fields: {}", unknown.join(", ")),
        )
        .with_detail("fields", unknown)
        .with_detail("allowed", allowed.to_vec()))
    }

    /// Require every field in `required` to be present and non-null
    pub fn require(&self, required: &[&str]) -> AppResult<()> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|f| matches!(self.0.get(*f), None | Some(Value::Null)))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("Missing required fields: {}", missing.join(", ")),
        )
        .with_detail("fields", missing))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ProblemKind {
    Format,
    Invalid,
    Enum {
        code: ErrorCode,
        value: String,
        allowed: Vec<&'static str>,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Problem {
    field: &'static str,
    expected: String,
    kind: ProblemKind,
}

/// Field-by-field coercion of a [`Payload`], collecting every problem
///
/// Each accessor returns `None` when the field is absent (or failed to
/// coerce); call [`FieldReader::finish`] before using any result.
pub struct FieldReader<'a> {
    body: &'a Payload,
    problems: Vec<Problem>,
}

impl<'a> FieldReader<'a> {
    pub fn new(body: &'a Payload) -> Self {
        Self {
            body,
            problems: Vec::new(),
        }
    }

    fn problem(&mut self, field: &'static str, expected: impl Into<String>, kind: ProblemKind) {
        self.problems.push(Problem {
            field,
            expected: expected.into(),
            kind,
        });
    }

    /// Present value, or `None` after recording a problem for `null`
    fn present(&mut self, field: &'static str) -> Option<&'a Value> {
        match self.body.get(field)? {
            Value::Null => {
                self.problem(field, "must not be null", ProblemKind::Invalid);
                None
            }
            value => Some(value),
        }
    }

    /// Non-empty text, trimmed
    pub fn text(&mut self, field: &'static str) -> Option<String> {
        match self.present(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::String(_) => {
                self.problem(field, "must not be empty", ProblemKind::Invalid);
                None
            }
            _ => {
                self.problem(field, "expected a string", ProblemKind::Format);
                None
            }
        }
    }

    /// Nullable text: absent → `None`, `null` or blank → `Some(None)`
    pub fn nullable_text(&mut self, field: &'static str) -> Option<Option<String>> {
        match self.body.get(field)? {
            Value::Null => Some(None),
            Value::String(s) if s.trim().is_empty() => Some(None),
            Value::String(s) => Some(Some(s.trim().to_string())),
            _ => {
                self.problem(field, "expected a string or null", ProblemKind::Format);
                None
            }
        }
    }

    /// Finite number, from a JSON number or a numeric string
    pub fn number(&mut self, field: &'static str) -> Option<f64> {
        let parsed = match self.present(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(v) if v.is_finite() => Some(v),
            _ => {
                self.problem(field, "expected a number", ProblemKind::Format);
                None
            }
        }
    }

    /// Integer identifier, from a JSON integer or an integer string
    pub fn id(&mut self, field: &'static str) -> Option<i64> {
        let parsed = match self.present(field)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.problem(field, "expected an integer id", ProblemKind::Format);
        }
        parsed
    }

    /// Calendar date in exact `YYYY-MM-DD` form
    pub fn date(&mut self, field: &'static str) -> Option<NaiveDate> {
        let parsed = match self.present(field)? {
            Value::String(s) => parse_date(s),
            _ => None,
        };
        if parsed.is_none() {
            self.problem(field, "expected a date as YYYY-MM-DD", ProblemKind::Format);
        }
        parsed
    }

    /// String value checked against an enumerated set
    pub fn one_of<T>(
        &mut self,
        field: &'static str,
        code: ErrorCode,
        allowed: Vec<&'static str>,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let value = self.present(field)?;
        let raw = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let parsed = value.as_str().and_then(&parse);
        if parsed.is_none() {
            let expected = format!("one of: {}", allowed.join(", "));
            self.problem(
                field,
                expected,
                ProblemKind::Enum {
                    code,
                    value: raw,
                    allowed,
                },
            );
        }
        parsed
    }

    /// Turn collected problems into a single error
    pub fn finish(self) -> AppResult<()> {
        let problems = self.problems;
        if problems.is_empty() {
            return Ok(());
        }

        if problems.len() == 1
            && let ProblemKind::Enum {
                code,
                value,
                allowed,
            } = &problems[0].kind
        {
            let field = problems[0].field;
            return Err(AppError::with_message(
                *code,
                format!(
                    "Invalid {field} '{value}'. Must be one of: {}",
                    allowed.join(", ")
                ),
            )
            .with_detail("field", field)
            .with_detail("allowed", allowed.clone()));
        }

        let code = if problems.iter().all(|p| p.kind == ProblemKind::Format) {
            ErrorCode::InvalidFormat
        } else {
            ErrorCode::ValidationFailed
        };
        let summary: Vec<String> = problems
            .iter()
            .map(|p| format!("{} ({})", p.field, p.expected))
            .collect();
        let fields: Vec<&str> = problems.iter().map(|p| p.field).collect();
        let mut err = AppError::with_message(code, format!("Invalid fields: {}", summary.join(", ")))
            .with_detail("fields", fields);
        if let Some(Problem {
            kind: ProblemKind::Enum { allowed, .. },
            ..
        }) = problems.iter().find(|p| matches!(p.kind, ProblemKind::Enum { .. }))
        {
            err = err.with_detail("allowed", allowed.clone());
        }
        Err(err)
    }
}

/// Unwrap a coerced mandatory field
pub fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::RequiredField,
            format!("Missing required fields: {field}"),
        )
        .with_detail("fields", vec![field.to_string()])
    })
}

/// Parse an exact `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Blank query parameters count as absent
pub fn query_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Optional integer query parameter
pub fn query_id(field: &str, value: Option<String>) -> AppResult<Option<i64>> {
    query_text(value)
        .map(|v| {
            v.parse::<i64>().map_err(|_| {
                AppError::with_message(
                    ErrorCode::InvalidFormat,
                    format!("Invalid {field}: expected an integer id"),
                )
                .with_detail("field", field.to_string())
            })
        })
        .transpose()
}

/// Optional date query parameter
pub fn query_date(field: &str, value: Option<String>) -> AppResult<Option<NaiveDate>> {
    query_text(value)
        .map(|v| {
            parse_date(&v).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::InvalidFormat,
                    format!("Invalid {field}: expected a date as YYYY-MM-DD"),
                )
                .with_detail("field", field.to_string())
            })
        })
        .transpose()
}

#[cfg(test)]
pub(crate) fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => Payload(map),
        other => panic!("test payload must be an object, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_names_every_missing_field() {
        let body = payload(json!({"name": "x", "email": null}));
        let err = body.require(&["name", "email", "phone"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Missing required fields: email, phone");
    }

    #[test]
    fn test_reject_unknown_lists_all() {
        let body = payload(json!({"name": "x", "colour": 1, "id": 3}));
        let err = body.reject_unknown(&["name"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownField);
        assert!(err.message.contains("colour"));
        assert!(err.message.contains("id"));
        assert!(!err.message.contains("name"));
    }

    #[test]
    fn test_parse_date_is_exact() {
        assert!(parse_date("2025-02-28").is_some());
        assert!(parse_date("2025-02-30").is_none());
        assert!(parse_date("2025-2-28").is_none());
        assert!(parse_date("2025-02-28T00:00:00").is_none());
        assert!(parse_date("28/02/2025").is_none());
    }

    #[test]
    fn test_coercions() {
        let body = payload(json!({
            "n1": 12, "n2": "3.5", "n3": "abc", "n4": true,
            "i1": "7", "i2": 1.5, "d1": "2024-01-31"
        }));
        let mut r = FieldReader::new(&body);
        assert_eq!(r.number("n1"), Some(12.0));
        assert_eq!(r.number("n2"), Some(3.5));
        assert_eq!(r.number("n3"), None);
        assert_eq!(r.number("n4"), None);
        assert_eq!(r.id("i1"), Some(7));
        assert_eq!(r.id("i2"), None);
        assert!(r.date("d1").is_some());
        assert_eq!(r.number("absent"), None);

        let err = r.finish().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(
            err.details.unwrap()["fields"],
            json!(["n3", "n4", "i2"])
        );
    }

    #[test]
    fn test_blank_text_and_null_are_validation_errors() {
        let body = payload(json!({"name": "   ", "email": null, "phone": null}));
        let mut r = FieldReader::new(&body);
        assert_eq!(r.text("name"), None);
        assert_eq!(r.text("email"), None);
        assert_eq!(r.nullable_text("phone"), Some(None));
        let err = r.finish().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("name (must not be empty)"));
        assert!(err.message.contains("email (must not be null)"));
    }

    #[test]
    fn test_single_enum_problem_lists_allowed_values() {
        let body = payload(json!({"status": "Shipped"}));
        let mut r = FieldReader::new(&body);
        let parsed = r.one_of(
            "status",
            ErrorCode::InvoiceStatusInvalid,
            vec!["Pending", "Paid", "Overdue"],
            |s| (s == "Paid").then_some(()),
        );
        assert!(parsed.is_none());
        let err = r.finish().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvoiceStatusInvalid);
        assert_eq!(
            err.message,
            "Invalid status 'Shipped'. Must be one of: Pending, Paid, Overdue"
        );
        assert_eq!(
            err.details.unwrap()["allowed"],
            json!(["Pending", "Paid", "Overdue"])
        );
    }

    #[test]
    fn test_query_helpers() {
        assert_eq!(query_id("client_id", Some(" 4 ".into())).unwrap(), Some(4));
        assert_eq!(query_id("client_id", Some("".into())).unwrap(), None);
        assert!(query_id("client_id", Some("four".into())).is_err());
        assert!(query_date("start_date", Some("2025-13-01".into())).is_err());
        assert_eq!(query_text(Some("  ".into())), None);
    }
}

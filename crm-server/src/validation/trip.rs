//! Trip payloads

use serde::Deserialize;
use shared::AppResult;
use shared::models::{TripCreate, TripFilter, TripUpdate};

use super::{FieldReader, Payload, query_date, query_id, query_text, required};

pub const FIELDS: &[&str] = &[
    "client_id",
    "destination",
    "start_date",
    "end_date",
    "price",
    "notes",
];
const REQUIRED: &[&str] = &["client_id", "destination", "start_date", "end_date", "price"];

pub fn create(body: &Payload) -> AppResult<TripCreate> {
    body.reject_unknown(FIELDS)?;
    body.require(REQUIRED)?;

    let mut r = FieldReader::new(body);
    let client_id = r.id("client_id");
    let destination = r.text("destination");
    let start_date = r.date("start_date");
    let end_date = r.date("end_date");
    let price = r.number("price");
    let notes = r.nullable_text("notes").flatten();
    r.finish()?;

    Ok(TripCreate {
        client_id: required(client_id, "client_id")?,
        destination: required(destination, "destination")?,
        start_date: required(start_date, "start_date")?,
        end_date: required(end_date, "end_date")?,
        price: required(price, "price")?,
        notes,
    })
}

pub fn update(body: &Payload) -> AppResult<TripUpdate> {
    body.reject_unknown(FIELDS)?;

    let mut r = FieldReader::new(body);
    let update = TripUpdate {
        client_id: r.id("client_id"),
        destination: r.text("destination"),
        start_date: r.date("start_date"),
        end_date: r.date("end_date"),
        price: r.number("price"),
        notes: r.nullable_text("notes"),
    };
    r.finish()?;
    Ok(update)
}

/// `GET /trips` query string
#[derive(Debug, Default, Deserialize)]
pub struct TripQuery {
    pub destination: Option<String>,
    pub client_id: Option<String>,
    pub start_date: Option<String>,
}

impl TripQuery {
    pub fn into_filter(self) -> AppResult<TripFilter> {
        Ok(TripFilter {
            destination: query_text(self.destination),
            client_id: query_id("client_id", self.client_id)?,
            start_date: query_date("start_date", self.start_date)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::payload;
    use serde_json::json;
    use shared::ErrorCode;

    #[test]
    fn test_create_coerces_strings() {
        let t = create(&payload(json!({
            "client_id": "3",
            "destination": "Lisbon",
            "start_date": "2025-05-01",
            "end_date": "2025-05-08",
            "price": "1299.50"
        })))
        .unwrap();
        assert_eq!(t.client_id, 3);
        assert_eq!(t.price, 1299.5);
        assert_eq!(t.start_date.to_string(), "2025-05-01");
        assert_eq!(t.notes, None);
    }

    #[test]
    fn test_create_aggregates_format_errors() {
        let err = create(&payload(json!({
            "client_id": 1,
            "destination": "Lisbon",
            "start_date": "05/01/2025",
            "end_date": "2025-05-08",
            "price": "cheap"
        })))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(err.details.unwrap()["fields"], json!(["start_date", "price"]));
    }

    #[test]
    fn test_update_clears_notes() {
        let u = update(&payload(json!({"notes": null, "price": 10}))).unwrap();
        assert_eq!(u.notes, Some(None));
        assert_eq!(u.price, Some(10.0));
        assert!(u.destination.is_none());
    }

    #[test]
    fn test_filter_rejects_bad_date() {
        let q = TripQuery {
            start_date: Some("2025-02-31".into()),
            ..Default::default()
        };
        assert_eq!(q.into_filter().unwrap_err().code, ErrorCode::InvalidFormat);
    }
}

//! Invoice payloads

use serde::Deserialize;
use shared::models::{InvoiceCreate, InvoiceFilter, InvoiceStatus, InvoiceUpdate};
use shared::{AppError, AppResult, ErrorCode};

use super::{FieldReader, Payload, query_id, query_text, required};

pub const FIELDS: &[&str] = &["trip_id", "issue_date", "due_date", "amount", "status"];
const REQUIRED: &[&str] = &["trip_id", "issue_date", "due_date", "amount"];

fn status(r: &mut FieldReader<'_>) -> Option<InvoiceStatus> {
    r.one_of(
        "status",
        ErrorCode::InvoiceStatusInvalid,
        InvoiceStatus::allowed(),
        InvoiceStatus::parse,
    )
}

/// Create an invoice; `status` defaults to `Pending`
pub fn create(body: &Payload) -> AppResult<InvoiceCreate> {
    body.reject_unknown(FIELDS)?;
    body.require(REQUIRED)?;

    let mut r = FieldReader::new(body);
    let trip_id = r.id("trip_id");
    let issue_date = r.date("issue_date");
    let due_date = r.date("due_date");
    let amount = r.number("amount");
    let status = status(&mut r);
    r.finish()?;

    Ok(InvoiceCreate {
        trip_id: required(trip_id, "trip_id")?,
        issue_date: required(issue_date, "issue_date")?,
        due_date: required(due_date, "due_date")?,
        amount: required(amount, "amount")?,
        status: status.unwrap_or_default(),
    })
}

pub fn update(body: &Payload) -> AppResult<InvoiceUpdate> {
    body.reject_unknown(FIELDS)?;

    let mut r = FieldReader::new(body);
    let update = InvoiceUpdate {
        trip_id: r.id("trip_id"),
        issue_date: r.date("issue_date"),
        due_date: r.date("due_date"),
        amount: r.number("amount"),
        status: status(&mut r),
    };
    r.finish()?;
    Ok(update)
}

/// `GET /invoices` query string
#[derive(Debug, Default, Deserialize)]
pub struct InvoiceQuery {
    pub trip_id: Option<String>,
    pub status: Option<String>,
}

impl InvoiceQuery {
    pub fn into_filter(self) -> AppResult<InvoiceFilter> {
        let status = query_text(self.status)
            .map(|s| {
                InvoiceStatus::parse(&s).ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::InvoiceStatusInvalid,
                        format!(
                            "Invalid status '{s}'. Must be one of: {}",
                            InvoiceStatus::allowed().join(", ")
                        ),
                    )
                    .with_detail("allowed", InvoiceStatus::allowed())
                })
            })
            .transpose()?;
        Ok(InvoiceFilter {
            trip_id: query_id("trip_id", self.trip_id)?,
            status,
        })
    }
}

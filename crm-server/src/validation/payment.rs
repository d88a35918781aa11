//! Payment payloads

use serde::Deserialize;
use shared::AppResult;
use shared::models::{PaymentCreate, PaymentFilter, PaymentUpdate};

use super::{FieldReader, Payload, query_id, required};

pub const FIELDS: &[&str] = &["invoice_id", "payment_date", "amount", "payment_method"];

pub fn create(body: &Payload) -> AppResult<PaymentCreate> {
    body.reject_unknown(FIELDS)?;
    body.require(FIELDS)?;

    let mut r = FieldReader::new(body);
    let invoice_id = r.id("invoice_id");
    let payment_date = r.date("payment_date");
    let amount = r.number("amount");
    let payment_method = r.text("payment_method");
    r.finish()?;

    Ok(PaymentCreate {
        invoice_id: required(invoice_id, "invoice_id")?,
        payment_date: required(payment_date, "payment_date")?,
        amount: required(amount, "amount")?,
        payment_method: required(payment_method, "payment_method")?,
    })
}

pub fn update(body: &Payload) -> AppResult<PaymentUpdate> {
    body.reject_unknown(FIELDS)?;

    let mut r = FieldReader::new(body);
    let update = PaymentUpdate {
        invoice_id: r.id("invoice_id"),
        payment_date: r.date("payment_date"),
        amount: r.number("amount"),
        payment_method: r.text("payment_method"),
    };
    r.finish()?;
    Ok(update)
}

/// `GET /payments` query string
#[derive(Debug, Default, Deserialize)]
pub struct PaymentQuery {
    pub invoice_id: Option<String>,
}

impl PaymentQuery {
    pub fn into_filter(self) -> AppResult<PaymentFilter> {
        Ok(PaymentFilter {
            invoice_id: query_id("invoice_id", self.invoice_id)?,
        })
    }
}

//! Payment Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payment entity, owned by an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: i64,
    pub invoice_id: i64,
    pub payment_date: NaiveDate,
    pub amount: f64,
    pub payment_method: String,
}

/// Create payment payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub invoice_id: i64,
    pub payment_date: NaiveDate,
    pub amount: f64,
    pub payment_method: String,
}

/// Update payment payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentUpdate {
    pub invoice_id: Option<i64>,
    pub payment_date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub payment_method: Option<String>,
}

impl PaymentUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Payment list filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentFilter {
    pub invoice_id: Option<i64>,
}

//! Client Model

use serde::{Deserialize, Serialize};

use super::{ClientNote, Invoice, Payment, Trip};

/// Client entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Client {
    pub id: i64,
    pub name: String,
    /// Stored lower-cased; unique across all clients
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
}

/// Create client payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
}

/// Update client payload
///
/// Outer `None` leaves the column untouched; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub company: Option<Option<String>>,
}

impl ClientUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.company.is_none()
    }
}

/// Client list filter (case-insensitive substring match per field)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

/// Invoice with its payments, as nested in [`ClientDetails`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceWithPayments {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub payments: Vec<Payment>,
}

/// Trip with its invoices, as nested in [`ClientDetails`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripWithInvoices {
    #[serde(flatten)]
    pub trip: Trip,
    pub invoices: Vec<InvoiceWithPayments>,
}

/// Full client graph: trips → invoices → payments, plus notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDetails {
    #[serde(flatten)]
    pub client: Client,
    pub notes: Vec<ClientNote>,
    pub trips: Vec<TripWithInvoices>,
}

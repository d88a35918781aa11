//! Invoice Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Invoice status. Stored and serialized by variant name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 3] = [Self::Pending, Self::Paid, Self::Overdue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
        }
    }

    /// Exact, case-sensitive match against the variant names
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invoice entity, owned by a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: i64,
    pub trip_id: i64,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub status: InvoiceStatus,
}

/// Create invoice payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub trip_id: i64,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub status: InvoiceStatus,
}

/// Update invoice payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceUpdate {
    pub trip_id: Option<i64>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub status: Option<InvoiceStatus>,
}

impl InvoiceUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Invoice list filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceFilter {
    pub trip_id: Option<i64>,
    pub status: Option<InvoiceStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_exact() {
        assert_eq!(InvoiceStatus::parse("Paid"), Some(InvoiceStatus::Paid));
        assert_eq!(InvoiceStatus::parse("paid"), None);
        assert_eq!(InvoiceStatus::parse("Shipped"), None);
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Pending);
    }

    #[test]
    fn test_status_serde_uses_variant_names() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Overdue).unwrap(),
            "\"Overdue\""
        );
        assert_eq!(InvoiceStatus::allowed(), vec!["Pending", "Paid", "Overdue"]);
    }
}

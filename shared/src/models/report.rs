//! Report Models

use serde::{Deserialize, Serialize};

use super::InvoiceStatus;
use chrono::NaiveDate;

/// Revenue-by-client row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRevenue {
    pub client_id: i64,
    pub client_name: String,
    pub total_revenue: f64,
}

/// Monthly revenue row, bucketed by payment year/month and trip destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub destination: String,
    pub total_revenue: f64,
}

/// Monthly revenue filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenueFilter {
    pub year: Option<i32>,
    /// Case-insensitive substring
    pub destination: Option<String>,
}

/// Unpaid invoice row (status other than `Paid`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UnpaidInvoice {
    pub invoice_id: i64,
    pub trip_id: i64,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub status: InvoiceStatus,
}

/// One partition of the invoice summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceBucket {
    pub count: usize,
    pub invoice_ids: Vec<i64>,
}

impl InvoiceBucket {
    pub fn push(&mut self, id: i64) {
        self.invoice_ids.push(id);
        self.count = self.invoice_ids.len();
    }
}

/// Invoice summary: disjoint paid / overdue / pending partitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    /// Date the partition was evaluated against
    pub as_of: NaiveDate,
    pub paid: InvoiceBucket,
    pub overdue: InvoiceBucket,
    pub pending: InvoiceBucket,
}

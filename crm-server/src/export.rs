//! Tabular (CSV) export
//!
//! Each exportable row type fixes its header and field order here. Stored
//! amounts are written as stored; computed revenue totals with two decimals.

use axum::response::{IntoResponse, Response};
use http::HeaderValue;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use shared::AppError;
use shared::models::{ClientDetails, ClientRevenue, InvoiceSummary, MonthlyRevenue, UnpaidInvoice};

/// A row that can be written as one CSV record
pub trait CsvRecord {
    const HEADER: &'static [&'static str];

    fn record(&self) -> Vec<String>;
}

fn total(value: f64) -> String {
    format!("{value:.2}")
}

impl CsvRecord for ClientRevenue {
    const HEADER: &'static [&'static str] = &["client_id", "client_name", "total_revenue"];

    fn record(&self) -> Vec<String> {
        vec![
            self.client_id.to_string(),
            self.client_name.clone(),
            total(self.total_revenue),
        ]
    }
}

impl CsvRecord for MonthlyRevenue {
    const HEADER: &'static [&'static str] = &["year", "month", "destination", "total_revenue"];

    fn record(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.month.to_string(),
            self.destination.clone(),
            total(self.total_revenue),
        ]
    }
}

impl CsvRecord for UnpaidInvoice {
    const HEADER: &'static [&'static str] = &[
        "invoice_id",
        "trip_id",
        "issue_date",
        "due_date",
        "amount",
        "status",
    ];

    fn record(&self) -> Vec<String> {
        vec![
            self.invoice_id.to_string(),
            self.trip_id.to_string(),
            self.issue_date.to_string(),
            self.due_date.to_string(),
            self.amount.to_string(),
            self.status.to_string(),
        ]
    }
}

/// One line of the invoice summary export
pub struct SummaryLine<'a> {
    pub category: &'static str,
    pub count: usize,
    pub invoice_ids: &'a [i64],
}

impl CsvRecord for SummaryLine<'_> {
    const HEADER: &'static [&'static str] = &["category", "count", "invoice_ids"];

    fn record(&self) -> Vec<String> {
        let ids: Vec<String> = self.invoice_ids.iter().map(i64::to_string).collect();
        vec![
            self.category.to_string(),
            self.count.to_string(),
            ids.join(";"),
        ]
    }
}

/// Summary lines in fixed order: paid, overdue, pending
pub fn summary_lines(summary: &InvoiceSummary) -> Vec<SummaryLine<'_>> {
    [
        ("paid", &summary.paid),
        ("overdue", &summary.overdue),
        ("pending", &summary.pending),
    ]
    .into_iter()
    .map(|(category, bucket)| SummaryLine {
        category,
        count: bucket.count,
        invoice_ids: &bucket.invoice_ids,
    })
    .collect()
}

/// Flattened client graph row, one per payment with left-join semantics
pub struct ClientDetailLine {
    cells: Vec<String>,
}

impl CsvRecord for ClientDetailLine {
    const HEADER: &'static [&'static str] = &[
        "client_id",
        "client_name",
        "trip_id",
        "destination",
        "start_date",
        "end_date",
        "trip_price",
        "invoice_id",
        "issue_date",
        "due_date",
        "invoice_amount",
        "invoice_status",
        "payment_id",
        "payment_date",
        "payment_amount",
        "payment_method",
    ];

    fn record(&self) -> Vec<String> {
        self.cells.clone()
    }
}

/// Flatten a client graph
///
/// A trip without invoices, or an invoice without payments, still yields one
/// line with the trailing columns left empty. A client without trips yields a
/// single line with only the client columns.
pub fn client_detail_lines(details: &ClientDetails) -> Vec<ClientDetailLine> {
    const TRIP_COLS: usize = 5;
    const INVOICE_COLS: usize = 5;
    const PAYMENT_COLS: usize = 4;

    let client = vec![details.client.id.to_string(), details.client.name.clone()];
    let blanks = |n: usize| std::iter::repeat_n(String::new(), n);
    let line = |parts: Vec<String>| ClientDetailLine { cells: parts };

    let mut lines = Vec::new();
    if details.trips.is_empty() {
        let cells = client
            .iter()
            .cloned()
            .chain(blanks(TRIP_COLS + INVOICE_COLS + PAYMENT_COLS))
            .collect();
        lines.push(line(cells));
        return lines;
    }

    for entry in &details.trips {
        let t = &entry.trip;
        let trip = vec![
            t.id.to_string(),
            t.destination.clone(),
            t.start_date.to_string(),
            t.end_date.to_string(),
            t.price.to_string(),
        ];
        if entry.invoices.is_empty() {
            let cells = client
                .iter()
                .chain(&trip)
                .cloned()
                .chain(blanks(INVOICE_COLS + PAYMENT_COLS))
                .collect();
            lines.push(line(cells));
            continue;
        }
        for inv_entry in &entry.invoices {
            let i = &inv_entry.invoice;
            let invoice = vec![
                i.id.to_string(),
                i.issue_date.to_string(),
                i.due_date.to_string(),
                i.amount.to_string(),
                i.status.to_string(),
            ];
            if inv_entry.payments.is_empty() {
                let cells = client
                    .iter()
                    .chain(&trip)
                    .chain(&invoice)
                    .cloned()
                    .chain(blanks(PAYMENT_COLS))
                    .collect();
                lines.push(line(cells));
                continue;
            }
            for p in &inv_entry.payments {
                let cells = client
                    .iter()
                    .chain(&trip)
                    .chain(&invoice)
                    .cloned()
                    .chain([
                        p.id.to_string(),
                        p.payment_date.to_string(),
                        p.amount.to_string(),
                        p.payment_method.clone(),
                    ])
                    .collect();
                lines.push(line(cells));
            }
        }
    }
    lines
}

/// Serialize rows with the type's header
pub fn to_csv<R: CsvRecord>(rows: &[R]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(R::HEADER)
        .map_err(|e| AppError::internal(format!("CSV write failed: {e}")))?;
    for row in rows {
        writer
            .write_record(row.record())
            .map_err(|e| AppError::internal(format!("CSV write failed: {e}")))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("CSV flush failed: {e}")))
}

/// `text/csv` attachment response named `<name>.csv`
pub fn csv_response<R: CsvRecord>(name: &str, rows: &[R]) -> Result<Response, AppError> {
    let body = to_csv(rows)?;
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{name}.csv\""))
        .map_err(|e| AppError::internal(format!("Invalid export filename: {e}")))?;
    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8")),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

//! Reporting Engine
//!
//! Read-only aggregations over the entity graph. Grouping and summing happen
//! here on `Decimal` so totals round the same way regardless of how many
//! payments feed them.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{
    ClientRevenue, Invoice, InvoiceFilter, InvoiceStatus, InvoiceSummary, MonthlyRevenue,
    MonthlyRevenueFilter, UnpaidInvoice,
};
use sqlx::SqlitePool;

use crate::db::repository::report::{ClientPaymentRow, MonthlyPaymentRow};
use crate::db::repository::{RepoResult, invoice, report};
use crate::money::{round_money, to_decimal, to_f64};

/// Total payments per client, largest first
pub async fn revenue_by_client(pool: &SqlitePool) -> RepoResult<Vec<ClientRevenue>> {
    let rows = report::client_payments(pool).await?;
    Ok(aggregate_client_revenue(rows))
}

/// Payments per (year, month, destination), chronological
pub async fn monthly_revenue(
    pool: &SqlitePool,
    filter: &MonthlyRevenueFilter,
) -> RepoResult<Vec<MonthlyRevenue>> {
    let rows = report::monthly_payments(pool, filter).await?;
    Ok(aggregate_monthly_revenue(rows))
}

pub async fn unpaid_invoices(pool: &SqlitePool) -> RepoResult<Vec<UnpaidInvoice>> {
    report::unpaid_invoices(pool).await
}

/// Partition every invoice as of `today`
pub async fn invoice_summary(pool: &SqlitePool, today: NaiveDate) -> RepoResult<InvoiceSummary> {
    let invoices = invoice::find_all(pool, &InvoiceFilter::default()).await?;
    Ok(summarize_invoices(&invoices, today))
}

pub fn aggregate_client_revenue(rows: Vec<ClientPaymentRow>) -> Vec<ClientRevenue> {
    let mut totals: HashMap<i64, (String, Decimal)> = HashMap::new();
    for row in rows {
        let entry = totals
            .entry(row.client_id)
            .or_insert_with(|| (row.client_name.clone(), Decimal::ZERO));
        entry.1 += to_decimal(row.amount);
    }

    let mut ranked: Vec<(i64, String, Decimal)> = totals
        .into_iter()
        .map(|(id, (name, total))| (id, name, round_money(total)))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .map(|(client_id, client_name, total)| ClientRevenue {
            client_id,
            client_name,
            total_revenue: to_f64(total),
        })
        .collect()
}

pub fn aggregate_monthly_revenue(rows: Vec<MonthlyPaymentRow>) -> Vec<MonthlyRevenue> {
    // BTreeMap key order is exactly year, month, destination
    let mut buckets: BTreeMap<(i64, i64, String), Decimal> = BTreeMap::new();
    for row in rows {
        *buckets
            .entry((row.year, row.month, row.destination))
            .or_insert(Decimal::ZERO) += to_decimal(row.amount);
    }

    buckets
        .into_iter()
        .map(|((year, month, destination), total)| MonthlyRevenue {
            year: year as i32,
            month: month as u32,
            destination,
            total_revenue: to_f64(total),
        })
        .collect()
}

/// Paid if the status says so, otherwise overdue once `due_date` is before `today`
pub fn summarize_invoices(invoices: &[Invoice], today: NaiveDate) -> InvoiceSummary {
    let mut summary = InvoiceSummary {
        as_of: today,
        paid: Default::default(),
        overdue: Default::default(),
        pending: Default::default(),
    };
    for inv in invoices {
        if inv.status == InvoiceStatus::Paid {
            summary.paid.push(inv.id);
        } else if inv.due_date < today {
            summary.overdue.push(inv.id);
        } else {
            summary.pending.push(inv.id);
        }
    }
    summary
}

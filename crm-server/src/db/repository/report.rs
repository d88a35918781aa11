//! Report Queries
//!
//! Raw rows for the reporting engine. Money is summed in Rust with `Decimal`,
//! so these queries return one row per payment rather than SQL aggregates.

use super::{RepoResult, push_contains};
use shared::models::{MonthlyRevenueFilter, UnpaidInvoice};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// Payment reachable through Client → Trip → Invoice → Payment
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ClientPaymentRow {
    pub client_id: i64,
    pub client_name: String,
    pub amount: f64,
}

/// Payment bucketed by payment year/month and trip destination
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MonthlyPaymentRow {
    pub year: i64,
    pub month: i64,
    pub destination: String,
    pub amount: f64,
}

pub async fn client_payments(pool: &SqlitePool) -> RepoResult<Vec<ClientPaymentRow>> {
    let rows = sqlx::query_as::<_, ClientPaymentRow>(
        "SELECT c.id AS client_id, c.name AS client_name, p.amount AS amount
         FROM clients c
         JOIN trips t ON t.client_id = c.id
         JOIN invoices i ON i.trip_id = t.id
         JOIN payments p ON p.invoice_id = i.id
         ORDER BY c.id, p.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn monthly_payments(
    pool: &SqlitePool,
    filter: &MonthlyRevenueFilter,
) -> RepoResult<Vec<MonthlyPaymentRow>> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT CAST(strftime('%Y', p.payment_date) AS INTEGER) AS year,
                CAST(strftime('%m', p.payment_date) AS INTEGER) AS month,
                t.destination AS destination,
                p.amount AS amount
         FROM payments p
         JOIN invoices i ON i.id = p.invoice_id
         JOIN trips t ON t.id = i.trip_id
         WHERE 1 = 1",
    );
    if let Some(year) = filter.year {
        qb.push(" AND CAST(strftime('%Y', p.payment_date) AS INTEGER) = ")
            .push_bind(year);
    }
    push_contains(&mut qb, "t.destination", filter.destination.as_deref());
    qb.push(" ORDER BY p.id");

    let rows = qb.build_query_as::<MonthlyPaymentRow>().fetch_all(pool).await?;
    Ok(rows)
}

/// Invoices whose status is anything but `Paid`
pub async fn unpaid_invoices(pool: &SqlitePool) -> RepoResult<Vec<UnpaidInvoice>> {
    let rows = sqlx::query_as::<_, UnpaidInvoice>(
        "SELECT id AS invoice_id, trip_id, issue_date, due_date, amount, status
         FROM invoices WHERE status <> 'Paid' ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

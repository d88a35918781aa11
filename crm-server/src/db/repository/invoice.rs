//! Invoice Repository

use super::{RepoError, RepoResult, begin_write, ensure_exists, push_eq_i64};
use shared::ErrorCode;
use shared::models::{Invoice, InvoiceCreate, InvoiceFilter, InvoiceUpdate};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, trip_id, issue_date, due_date, amount, status";

pub async fn find_all(pool: &SqlitePool, filter: &InvoiceFilter) -> RepoResult<Vec<Invoice>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM invoices WHERE 1 = 1"));
    push_eq_i64(&mut qb, "trip_id", filter.trip_id);
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    qb.push(" ORDER BY id");

    let invoices = qb.build_query_as::<Invoice>().fetch_all(pool).await?;
    Ok(invoices)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Invoice>> {
    let mut conn = pool.acquire().await?;
    fetch(&mut conn, id).await
}

async fn fetch(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Invoice>> {
    let invoice =
        sqlx::query_as::<_, Invoice>(&format!("SELECT {COLUMNS} FROM invoices WHERE id = ?"))
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(invoice)
}

pub async fn create(pool: &SqlitePool, data: InvoiceCreate) -> RepoResult<Invoice> {
    let mut tx = begin_write(pool).await?;
    ensure_exists(&mut tx, "trips", data.trip_id, ErrorCode::TripNotFound).await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO invoices (trip_id, issue_date, due_date, amount, status)
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.trip_id)
    .bind(data.issue_date)
    .bind(data.due_date)
    .bind(data.amount)
    .bind(data.status)
    .fetch_one(&mut *tx)
    .await?;

    let invoice = fetch(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create invoice".into()))?;
    tx.commit().await?;
    Ok(invoice)
}

pub async fn update(pool: &SqlitePool, id: i64, data: InvoiceUpdate) -> RepoResult<Invoice> {
    let mut tx = begin_write(pool).await?;
    ensure_exists(&mut tx, "invoices", id, ErrorCode::InvoiceNotFound).await?;
    if let Some(trip_id) = data.trip_id {
        ensure_exists(&mut tx, "trips", trip_id, ErrorCode::TripNotFound).await?;
    }

    if !data.is_empty() {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE invoices SET ");
        let mut set = qb.separated(", ");
        if let Some(trip_id) = data.trip_id {
            set.push("trip_id = ").push_bind_unseparated(trip_id);
        }
        if let Some(issue_date) = data.issue_date {
            set.push("issue_date = ").push_bind_unseparated(issue_date);
        }
        if let Some(due_date) = data.due_date {
            set.push("due_date = ").push_bind_unseparated(due_date);
        }
        if let Some(amount) = data.amount {
            set.push("amount = ").push_bind_unseparated(amount);
        }
        if let Some(status) = data.status {
            set.push("status = ").push_bind_unseparated(status);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.build().execute(&mut *tx).await?;
    }

    let invoice = fetch(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::not_found(ErrorCode::InvoiceNotFound))?;
    tx.commit().await?;
    Ok(invoice)
}

/// Delete an invoice together with its payments
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = begin_write(pool).await?;
    ensure_exists(&mut tx, "invoices", id, ErrorCode::InvoiceNotFound).await?;

    sqlx::query("DELETE FROM payments WHERE invoice_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM invoices WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

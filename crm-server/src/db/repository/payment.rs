//! Payment Repository

use super::{RepoError, RepoResult, begin_write, ensure_exists, push_eq_i64};
use shared::ErrorCode;
use shared::models::{Payment, PaymentCreate, PaymentFilter, PaymentUpdate};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, invoice_id, payment_date, amount, payment_method";

pub async fn find_all(pool: &SqlitePool, filter: &PaymentFilter) -> RepoResult<Vec<Payment>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM payments WHERE 1 = 1"));
    push_eq_i64(&mut qb, "invoice_id", filter.invoice_id);
    qb.push(" ORDER BY id");

    let payments = qb.build_query_as::<Payment>().fetch_all(pool).await?;
    Ok(payments)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Payment>> {
    let mut conn = pool.acquire().await?;
    fetch(&mut conn, id).await
}

async fn fetch(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Payment>> {
    let payment =
        sqlx::query_as::<_, Payment>(&format!("SELECT {COLUMNS} FROM payments WHERE id = ?"))
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(payment)
}

pub async fn create(pool: &SqlitePool, data: PaymentCreate) -> RepoResult<Payment> {
    let mut tx = begin_write(pool).await?;
    ensure_exists(&mut tx, "invoices", data.invoice_id, ErrorCode::InvoiceNotFound).await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO payments (invoice_id, payment_date, amount, payment_method)
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(data.invoice_id)
    .bind(data.payment_date)
    .bind(data.amount)
    .bind(&data.payment_method)
    .fetch_one(&mut *tx)
    .await?;

    let payment = fetch(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create payment".into()))?;
    tx.commit().await?;
    Ok(payment)
}

pub async fn update(pool: &SqlitePool, id: i64, data: PaymentUpdate) -> RepoResult<Payment> {
    let mut tx = begin_write(pool).await?;
    ensure_exists(&mut tx, "payments", id, ErrorCode::PaymentNotFound).await?;
    if let Some(invoice_id) = data.invoice_id {
        ensure_exists(&mut tx, "invoices", invoice_id, ErrorCode::InvoiceNotFound).await?;
    }

    if !data.is_empty() {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE payments SET ");
        let mut set = qb.separated(", ");
        if let Some(invoice_id) = data.invoice_id {
            set.push("invoice_id = ").push_bind_unseparated(invoice_id);
        }
        if let Some(payment_date) = data.payment_date {
            set.push("payment_date = ").push_bind_unseparated(payment_date);
        }
        if let Some(amount) = data.amount {
            set.push("amount = ").push_bind_unseparated(amount);
        }
        if let Some(method) = data.payment_method {
            set.push("payment_method = ").push_bind_unseparated(method);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.build().execute(&mut *tx).await?;
    }

    let payment = fetch(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::not_found(ErrorCode::PaymentNotFound))?;
    tx.commit().await?;
    Ok(payment)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM payments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    if rows == 0 {
        return Err(RepoError::not_found(ErrorCode::PaymentNotFound));
    }
    Ok(())
}

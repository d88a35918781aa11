//! Client Repository

use std::collections::HashMap;

use super::{RepoError, RepoResult, begin_write, ensure_exists, push_contains};
use shared::ErrorCode;
use shared::models::{
    Client, ClientCreate, ClientDetails, ClientFilter, ClientNote, ClientUpdate, Invoice,
    InvoiceWithPayments, Payment, Trip, TripWithInvoices,
};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, name, email, phone, company";

/// Rows removed by a cascading client delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CascadeCounts {
    pub trips: u64,
    pub invoices: u64,
    pub payments: u64,
    pub notes: u64,
}

pub async fn find_all(pool: &SqlitePool, filter: &ClientFilter) -> RepoResult<Vec<Client>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM clients WHERE 1 = 1"));
    push_contains(&mut qb, "name", filter.name.as_deref());
    push_contains(&mut qb, "email", filter.email.as_deref());
    push_contains(&mut qb, "phone", filter.phone.as_deref());
    push_contains(&mut qb, "company", filter.company.as_deref());
    qb.push(" ORDER BY id");

    let clients = qb.build_query_as::<Client>().fetch_all(pool).await?;
    Ok(clients)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Client>> {
    let mut conn = pool.acquire().await?;
    fetch(&mut conn, id).await
}

async fn fetch(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Client>> {
    let client = sqlx::query_as::<_, Client>(&format!("SELECT {COLUMNS} FROM clients WHERE id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(client)
}

/// Whether another client (other than `except_id`) already uses `email`
async fn email_taken(
    conn: &mut SqliteConnection,
    email: &str,
    except_id: Option<i64>,
) -> RepoResult<bool> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM clients WHERE email = ? AND id IS NOT ? LIMIT 1")
            .bind(email)
            .bind(except_id)
            .fetch_optional(conn)
            .await?;
    Ok(found.is_some())
}

pub async fn create(pool: &SqlitePool, data: ClientCreate) -> RepoResult<Client> {
    let mut tx = begin_write(pool).await?;

    if email_taken(&mut tx, &data.email, None).await? {
        return Err(RepoError::duplicate(ErrorCode::ClientEmailExists));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO clients (name, email, phone, company) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.company)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| RepoError::from(e).on_duplicate(ErrorCode::ClientEmailExists))?;

    let client = fetch(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create client".into()))?;
    tx.commit().await?;
    Ok(client)
}

pub async fn update(pool: &SqlitePool, id: i64, data: ClientUpdate) -> RepoResult<Client> {
    let mut tx = begin_write(pool).await?;

    ensure_exists(&mut tx, "clients", id, ErrorCode::ClientNotFound).await?;

    if let Some(email) = &data.email
        && email_taken(&mut tx, email, Some(id)).await?
    {
        return Err(RepoError::duplicate(ErrorCode::ClientEmailExists));
    }

    if !data.is_empty() {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE clients SET ");
        let mut set = qb.separated(", ");
        if let Some(name) = data.name {
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(email) = data.email {
            set.push("email = ").push_bind_unseparated(email);
        }
        if let Some(phone) = data.phone {
            set.push("phone = ").push_bind_unseparated(phone);
        }
        if let Some(company) = data.company {
            set.push("company = ").push_bind_unseparated(company);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.build()
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::from(e).on_duplicate(ErrorCode::ClientEmailExists))?;
    }

    let client = fetch(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::not_found(ErrorCode::ClientNotFound))?;
    tx.commit().await?;
    Ok(client)
}

/// Delete a client and its whole subtree in dependency order
///
/// Payments, invoices, trips and notes go first, the client row last, all in
/// one transaction.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<CascadeCounts> {
    let mut tx = begin_write(pool).await?;

    ensure_exists(&mut tx, "clients", id, ErrorCode::ClientNotFound).await?;

    let payments = sqlx::query(
        "DELETE FROM payments WHERE invoice_id IN (
             SELECT i.id FROM invoices i JOIN trips t ON t.id = i.trip_id WHERE t.client_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let invoices = sqlx::query(
        "DELETE FROM invoices WHERE trip_id IN (SELECT id FROM trips WHERE client_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let trips = sqlx::query("DELETE FROM trips WHERE client_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let notes = sqlx::query("DELETE FROM client_notes WHERE client_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM clients WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(CascadeCounts {
        trips,
        invoices,
        payments,
        notes,
    })
}

/// Load a client with notes (newest first) and trips → invoices → payments
pub async fn find_details(pool: &SqlitePool, id: i64) -> RepoResult<Option<ClientDetails>> {
    // One transaction so the graph is read from a single snapshot
    let mut tx = begin_write(pool).await?;

    let Some(client) = fetch(&mut tx, id).await? else {
        return Ok(None);
    };

    let notes = sqlx::query_as::<_, ClientNote>(
        "SELECT id, client_id, note, created_at FROM client_notes
         WHERE client_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    let trips = sqlx::query_as::<_, Trip>(
        "SELECT id, client_id, destination, start_date, end_date, price, notes
         FROM trips WHERE client_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    let invoices = sqlx::query_as::<_, Invoice>(
        "SELECT i.id, i.trip_id, i.issue_date, i.due_date, i.amount, i.status
         FROM invoices i JOIN trips t ON t.id = i.trip_id
         WHERE t.client_id = ? ORDER BY i.id",
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    let payments = sqlx::query_as::<_, Payment>(
        "SELECT p.id, p.invoice_id, p.payment_date, p.amount, p.payment_method
         FROM payments p
         JOIN invoices i ON i.id = p.invoice_id
         JOIN trips t ON t.id = i.trip_id
         WHERE t.client_id = ? ORDER BY p.id",
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Some(assemble_details(client, notes, trips, invoices, payments)))
}

fn assemble_details(
    client: Client,
    notes: Vec<ClientNote>,
    trips: Vec<Trip>,
    invoices: Vec<Invoice>,
    payments: Vec<Payment>,
) -> ClientDetails {
    let mut payments_by_invoice: HashMap<i64, Vec<Payment>> = HashMap::new();
    for payment in payments {
        payments_by_invoice
            .entry(payment.invoice_id)
            .or_default()
            .push(payment);
    }

    let mut invoices_by_trip: HashMap<i64, Vec<InvoiceWithPayments>> = HashMap::new();
    for invoice in invoices {
        let payments = payments_by_invoice.remove(&invoice.id).unwrap_or_default();
        invoices_by_trip
            .entry(invoice.trip_id)
            .or_default()
            .push(InvoiceWithPayments { invoice, payments });
    }

    let trips = trips
        .into_iter()
        .map(|trip| TripWithInvoices {
            invoices: invoices_by_trip.remove(&trip.id).unwrap_or_default(),
            trip,
        })
        .collect();

    ClientDetails {
        client,
        notes,
        trips,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::pool;

    fn new_client(name: &str, email: &str) -> ClientCreate {
        ClientCreate {
            name: name.into(),
            email: email.into(),
            phone: None,
            company: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = pool().await;
        let created = create(&pool, new_client("Ada", "ada@example.com"))
            .await
            .unwrap();
        let found = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(find_by_id(&pool, created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let pool = pool().await;
        create(&pool, new_client("Ada", "ada@example.com"))
            .await
            .unwrap();
        let err = create(&pool, new_client("Other", "ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ErrorCode::ClientEmailExists, _)));
        assert_eq!(find_all(&pool, &ClientFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_email_collision_and_own_email() {
        let pool = pool().await;
        let a = create(&pool, new_client("A", "a@example.com")).await.unwrap();
        create(&pool, new_client("B", "b@example.com")).await.unwrap();

        let err = update(
            &pool,
            a.id,
            ClientUpdate {
                email: Some("b@example.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ErrorCode::ClientEmailExists, _)));

        let same = update(
            &pool,
            a.id,
            ClientUpdate {
                email: Some("a@example.com".into()),
                phone: Some(Some("555".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(same.phone.as_deref(), Some("555"));
    }

    #[tokio::test]
    async fn test_update_missing_client() {
        let pool = pool().await;
        let err = update(&pool, 42, ClientUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(ErrorCode::ClientNotFound, _)));
    }

    #[tokio::test]
    async fn test_filter_is_case_insensitive_substring() {
        let pool = pool().await;
        let mut c = new_client("Grace Hopper", "grace@navy.mil");
        c.company = Some("US Navy".into());
        create(&pool, c).await.unwrap();
        create(&pool, new_client("Alan Turing", "alan@bletchley.uk"))
            .await
            .unwrap();

        let filter = ClientFilter {
            name: Some("HOPP".into()),
            ..Default::default()
        };
        let found = find_all(&pool, &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Grace Hopper");

        let filter = ClientFilter {
            company: Some("navy".into()),
            email: Some("GRACE".into()),
            ..Default::default()
        };
        assert_eq!(find_all(&pool, &filter).await.unwrap().len(), 1);

        let filter = ClientFilter {
            company: Some("navy".into()),
            name: Some("alan".into()),
            ..Default::default()
        };
        assert!(find_all(&pool, &filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_client() {
        let pool = pool().await;
        let err = delete(&pool, 9).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(ErrorCode::ClientNotFound, _)));
    }

    async fn file_pool(dir: &tempfile::TempDir) -> SqlitePool {
        let url = format!("sqlite://{}", dir.path().join("crm.db").display());
        crate::db::DbService::new(&url).await.unwrap().pool
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir).await;

        let tasks: Vec<_> = (0..40)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    create(&pool, new_client("Burst", &format!("burst{i}@example.com"))).await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let all = find_all(&pool, &ClientFilter::default()).await.unwrap();
        assert_eq!(all.len(), 40);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_same_email_admits_one() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir).await;

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    create(&pool, new_client("Race", "race@example.com")).await
                })
            })
            .collect();
        let mut created = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert!(
                    matches!(err, RepoError::Duplicate(ErrorCode::ClientEmailExists, _)),
                    "{err}"
                ),
            }
        }
        assert_eq!(created, 1);
    }
}

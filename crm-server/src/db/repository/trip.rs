//! Trip Repository

use super::{RepoError, RepoResult, begin_write, ensure_exists, push_contains, push_eq_i64};
use shared::ErrorCode;
use shared::models::{Trip, TripCreate, TripFilter, TripUpdate};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, client_id, destination, start_date, end_date, price, notes";

pub async fn find_all(pool: &SqlitePool, filter: &TripFilter) -> RepoResult<Vec<Trip>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM trips WHERE 1 = 1"));
    push_contains(&mut qb, "destination", filter.destination.as_deref());
    push_eq_i64(&mut qb, "client_id", filter.client_id);
    if let Some(start) = filter.start_date {
        qb.push(" AND start_date >= ").push_bind(start);
    }
    qb.push(" ORDER BY id");

    let trips = qb.build_query_as::<Trip>().fetch_all(pool).await?;
    Ok(trips)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Trip>> {
    let mut conn = pool.acquire().await?;
    fetch(&mut conn, id).await
}

async fn fetch(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Trip>> {
    let trip = sqlx::query_as::<_, Trip>(&format!("SELECT {COLUMNS} FROM trips WHERE id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(trip)
}

pub async fn create(pool: &SqlitePool, data: TripCreate) -> RepoResult<Trip> {
    let mut tx = begin_write(pool).await?;
    ensure_exists(&mut tx, "clients", data.client_id, ErrorCode::ClientNotFound).await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO trips (client_id, destination, start_date, end_date, price, notes)
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.client_id)
    .bind(&data.destination)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.price)
    .bind(&data.notes)
    .fetch_one(&mut *tx)
    .await?;

    let trip = fetch(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create trip".into()))?;
    tx.commit().await?;
    Ok(trip)
}

pub async fn update(pool: &SqlitePool, id: i64, data: TripUpdate) -> RepoResult<Trip> {
    let mut tx = begin_write(pool).await?;
    ensure_exists(&mut tx, "trips", id, ErrorCode::TripNotFound).await?;
    if let Some(client_id) = data.client_id {
        ensure_exists(&mut tx, "clients", client_id, ErrorCode::ClientNotFound).await?;
    }

    if !data.is_empty() {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE trips SET ");
        let mut set = qb.separated(", ");
        if let Some(client_id) = data.client_id {
            set.push("client_id = ").push_bind_unseparated(client_id);
        }
        if let Some(destination) = data.destination {
            set.push("destination = ").push_bind_unseparated(destination);
        }
        if let Some(start_date) = data.start_date {
            set.push("start_date = ").push_bind_unseparated(start_date);
        }
        if let Some(end_date) = data.end_date {
            set.push("end_date = ").push_bind_unseparated(end_date);
        }
        if let Some(price) = data.price {
            set.push("price = ").push_bind_unseparated(price);
        }
        if let Some(notes) = data.notes {
            set.push("notes = ").push_bind_unseparated(notes);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.build().execute(&mut *tx).await?;
    }

    let trip = fetch(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::not_found(ErrorCode::TripNotFound))?;
    tx.commit().await?;
    Ok(trip)
}

/// Delete a trip together with its invoices and their payments
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = begin_write(pool).await?;
    ensure_exists(&mut tx, "trips", id, ErrorCode::TripNotFound).await?;

    sqlx::query(
        "DELETE FROM payments WHERE invoice_id IN (SELECT id FROM invoices WHERE trip_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;
    sqlx::query("DELETE FROM invoices WHERE trip_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM trips WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{client, test_support::pool};
    use chrono::NaiveDate;
    use shared::models::ClientCreate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn trip_for(client_id: i64, destination: &str, start: &str) -> TripCreate {
        TripCreate {
            client_id,
            destination: destination.into(),
            start_date: date(start),
            end_date: date(start),
            price: 999.5,
            notes: None,
        }
    }

    async fn seed_client(pool: &SqlitePool) -> i64 {
        client::create(
            pool,
            ClientCreate {
                name: "Traveller".into(),
                email: "traveller@example.com".into(),
                phone: None,
                company: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_create_requires_existing_client() {
        let pool = pool().await;
        let err = create(&pool, trip_for(404, "Lisbon", "2025-05-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(ErrorCode::ClientNotFound, _)));
        assert!(find_all(&pool, &TripFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filters() {
        let pool = pool().await;
        let client_id = seed_client(&pool).await;
        create(&pool, trip_for(client_id, "Lisbon", "2025-05-01"))
            .await
            .unwrap();
        create(&pool, trip_for(client_id, "Kyoto", "2025-09-10"))
            .await
            .unwrap();

        let by_dest = TripFilter {
            destination: Some("LIS".into()),
            ..Default::default()
        };
        assert_eq!(find_all(&pool, &by_dest).await.unwrap().len(), 1);

        let by_start = TripFilter {
            start_date: Some(date("2025-09-10")),
            ..Default::default()
        };
        let trips = find_all(&pool, &by_start).await.unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].destination, "Kyoto");

        let by_client = TripFilter {
            client_id: Some(client_id + 1),
            ..Default::default()
        };
        assert!(find_all(&pool, &by_client).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_missing_client_reference() {
        let pool = pool().await;
        let client_id = seed_client(&pool).await;
        let trip = create(&pool, trip_for(client_id, "Lisbon", "2025-05-01"))
            .await
            .unwrap();

        let err = update(
            &pool,
            trip.id,
            TripUpdate {
                client_id: Some(client_id + 50),
                price: Some(1.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(ErrorCode::ClientNotFound, _)));
        assert_eq!(find_by_id(&pool, trip.id).await.unwrap().unwrap().price, 999.5);

        let updated = update(
            &pool,
            trip.id,
            TripUpdate {
                notes: Some(Some("window seat".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.notes.as_deref(), Some("window seat"));
    }
}

//! Client Note Repository
//!
//! Every operation resolves the owning client first, so a missing client is
//! reported as such even when the note id is also unknown.

use super::{RepoError, RepoResult, begin_write, ensure_exists};
use shared::ErrorCode;
use shared::models::ClientNote;
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, client_id, note, created_at";

/// Resolve the owning client and, when given, the note itself
///
/// Lets handlers report a missing client or note before looking at the body.
pub async fn resolve(pool: &SqlitePool, client_id: i64, note_id: Option<i64>) -> RepoResult<()> {
    let mut conn = pool.acquire().await?;
    ensure_exists(&mut conn, "clients", client_id, ErrorCode::ClientNotFound).await?;
    if let Some(note_id) = note_id {
        fetch(&mut conn, client_id, note_id).await?;
    }
    Ok(())
}

/// Notes of a client, newest first
pub async fn find_by_client(pool: &SqlitePool, client_id: i64) -> RepoResult<Vec<ClientNote>> {
    let mut conn = pool.acquire().await?;
    ensure_exists(&mut conn, "clients", client_id, ErrorCode::ClientNotFound).await?;

    let notes = sqlx::query_as::<_, ClientNote>(&format!(
        "SELECT {COLUMNS} FROM client_notes WHERE client_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(client_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(notes)
}

async fn fetch(
    conn: &mut SqliteConnection,
    client_id: i64,
    note_id: i64,
) -> RepoResult<ClientNote> {
    sqlx::query_as::<_, ClientNote>(&format!(
        "SELECT {COLUMNS} FROM client_notes WHERE id = ? AND client_id = ?"
    ))
    .bind(note_id)
    .bind(client_id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| RepoError::not_found(ErrorCode::NoteNotFound))
}

pub async fn create(pool: &SqlitePool, client_id: i64, note: String) -> RepoResult<ClientNote> {
    let mut tx = begin_write(pool).await?;
    ensure_exists(&mut tx, "clients", client_id, ErrorCode::ClientNotFound).await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO client_notes (client_id, note, created_at) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(client_id)
    .bind(&note)
    .bind(now_millis())
    .fetch_one(&mut *tx)
    .await?;

    let created = fetch(&mut tx, client_id, id).await?;
    tx.commit().await?;
    Ok(created)
}

/// Replace the note text; `created_at` is never touched
pub async fn update(
    pool: &SqlitePool,
    client_id: i64,
    note_id: i64,
    note: String,
) -> RepoResult<ClientNote> {
    let mut tx = begin_write(pool).await?;
    ensure_exists(&mut tx, "clients", client_id, ErrorCode::ClientNotFound).await?;
    fetch(&mut tx, client_id, note_id).await?;

    sqlx::query("UPDATE client_notes SET note = ? WHERE id = ? AND client_id = ?")
        .bind(&note)
        .bind(note_id)
        .bind(client_id)
        .execute(&mut *tx)
        .await?;

    let updated = fetch(&mut tx, client_id, note_id).await?;
    tx.commit().await?;
    Ok(updated)
}

pub async fn delete(pool: &SqlitePool, client_id: i64, note_id: i64) -> RepoResult<()> {
    let mut tx = begin_write(pool).await?;
    ensure_exists(&mut tx, "clients", client_id, ErrorCode::ClientNotFound).await?;

    let rows = sqlx::query("DELETE FROM client_notes WHERE id = ? AND client_id = ?")
        .bind(note_id)
        .bind(client_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if rows == 0 {
        return Err(RepoError::not_found(ErrorCode::NoteNotFound));
    }

    tx.commit().await?;
    Ok(())
}

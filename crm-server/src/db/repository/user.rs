//! User Repository

use super::{RepoError, RepoResult, begin_write};
use shared::ErrorCode;
use shared::models::{Role, User};
use sqlx::SqlitePool;

/// User row including the password hash. Never serialized.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            role: record.role,
        }
    }
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT id, username, role FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(users)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<UserRecord>> {
    let user = sqlx::query_as::<_, UserRecord>(
        "SELECT id, username, password_hash, role FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    role: Role,
) -> RepoResult<User> {
    let mut tx = begin_write(pool).await?;

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(RepoError::duplicate(ErrorCode::UsernameExists));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| RepoError::from(e).on_duplicate(ErrorCode::UsernameExists))?;

    tx.commit().await?;
    Ok(User {
        id,
        username: username.to_string(),
        role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::pool;

    #[tokio::test]
    async fn test_username_is_unique() {
        let pool = pool().await;
        let user = create(&pool, "maria", "hash", Role::Analyst).await.unwrap();
        assert_eq!(user.role, Role::Analyst);

        let err = create(&pool, "maria", "hash2", Role::Admin).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ErrorCode::UsernameExists, _)));

        let record = find_by_username(&pool, "maria").await.unwrap().unwrap();
        assert_eq!(record.password_hash, "hash");
        assert_eq!(find_all(&pool).await.unwrap(), vec![user]);
    }
}

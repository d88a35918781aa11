//! Client Note Model

use serde::{Deserialize, Serialize};

/// Free-text note attached to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ClientNote {
    pub id: i64,
    pub client_id: i64,
    pub note: String,
    /// UTC epoch milliseconds, set once on insert
    pub created_at: i64,
}

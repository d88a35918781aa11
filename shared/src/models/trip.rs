//! Trip Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trip entity, owned by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Trip {
    pub id: i64,
    pub client_id: i64,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub notes: Option<String>,
}

/// Create trip payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripCreate {
    pub client_id: i64,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub notes: Option<String>,
}

/// Update trip payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripUpdate {
    pub client_id: Option<i64>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub notes: Option<Option<String>>,
}

impl TripUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Trip list filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripFilter {
    /// Case-insensitive substring
    pub destination: Option<String>,
    pub client_id: Option<i64>,
    /// Inclusive lower bound on `start_date`
    pub start_date: Option<NaiveDate>,
}

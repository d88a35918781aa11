//! Shared types for the travel CRM
//!
//! Error codes and API response structures, entity models and report rows
//! used by the server and by any client of its HTTP API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};

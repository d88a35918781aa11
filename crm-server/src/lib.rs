//! Travel-agency CRM server
//!
//! Clients, their trips, invoices, payments and notes behind a role-gated
//! JSON API, with revenue and receivables reports.
//!
//! # Modules
//!
//! - [`core`] - configuration, state, server
//! - [`db`] - SQLite pool, migrations and repositories
//! - [`validation`] - request payload checks
//! - [`auth`] - JWT identity and role guard
//! - [`reports`] / [`export`] - reporting engine and CSV output
//! - [`api`] - axum routes and handlers

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod export;
pub mod money;
pub mod reports;
pub mod utils;
pub mod validation;

pub use crate::core::{Config, Server, ServerState};

/// Security event log, `target: "security"`
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

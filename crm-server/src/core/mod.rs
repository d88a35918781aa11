//! Core: configuration, shared state and the HTTP server
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - handles shared by every handler
//! - [`Server`] - binds and serves the application

pub mod config;
pub mod server;
pub mod state;

pub use config::{BoxError, Config};
pub use server::Server;
pub use state::ServerState;

//! Domain Models
//!
//! Entity rows, validated write payloads and list filters for the CRM.

pub mod client;
pub mod client_note;
pub mod invoice;
pub mod payment;
pub mod report;
pub mod trip;
pub mod user;

pub use client::*;
pub use client_note::*;
pub use invoice::*;
pub use payment::*;
pub use report::*;
pub use trip::*;
pub use user::*;

//! Authentication and authorization
//!
//! - [`JwtService`] - token issue / validation
//! - [`CurrentUser`] - caller identity resolved from a token
//! - [`require_auth`] - authentication middleware
//! - [`require_roles`] - role allow-list middleware, backed by [`authorize`]

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_roles};
pub use password::{hash_password_blocking, verify_password_blocking};
pub use permissions::authorize;

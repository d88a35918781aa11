//! Role allow-lists
//!
//! | Operation | Roles |
//! |-----------|-------|
//! | delete anything, list users | admin |
//! | create / update, client by id | admin, agent |
//! | list / read, client details, notes | admin, agent, analyst |
//! | reports | admin, analyst |

use shared::AppError;
use shared::models::Role;

use super::CurrentUser;

pub const ADMIN: &[Role] = &[Role::Admin];
pub const WRITERS: &[Role] = &[Role::Admin, Role::Agent];
pub const READERS: &[Role] = &[Role::Admin, Role::Agent, Role::Analyst];
pub const REPORT_VIEWERS: &[Role] = &[Role::Admin, Role::Analyst];

/// Allow the caller only if their role is in `allowed`
pub fn authorize(user: &CurrentUser, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&user.role) {
        return Ok(());
    }
    let names: Vec<&str> = allowed.iter().map(Role::as_str).collect();
    Err(
        AppError::permission_denied(format!("Forbidden: requires role {}", names.join(" or ")))
            .with_detail("role", user.role.as_str())
            .with_detail("allowed", names),
    )
}

//! Well-known organization role name constants.
//!
//! These must match the `chk_organization_users_role` constraint in
//! `20240101000002_create_organization_users.sql`.

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_DISPATCHER: &str = "dispatcher";

/// Role carried by worker-kind identity assertions.
pub const ROLE_WORKER: &str = "worker";

const USER_ROLES: &[&str] = &[ROLE_OWNER, ROLE_ADMIN, ROLE_DISPATCHER];

/// Whether `role` is one of the organization-user roles.
pub fn is_user_role(role: &str) -> bool {
    USER_ROLES.contains(&role)
}

/// Owners and admins may manage workers and inspect storage reconciliation.
pub fn is_manager(role: &str) -> bool {
    role == ROLE_OWNER || role == ROLE_ADMIN
}

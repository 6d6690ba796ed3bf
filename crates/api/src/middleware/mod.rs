//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- any valid token (organization user or worker).
//! - [`rbac::RequireUser`] -- organization users only; rejects worker tokens.
//! - [`rbac::RequireManager`] -- `owner` or `admin` organization users.

pub mod auth;
pub mod rbac;

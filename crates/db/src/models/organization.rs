//! Organization (tenant) and organization-user models.

use routewise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `organizations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub industry: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `organization_users` table.
///
/// The password hash is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrganizationUser {
    pub id: DbId,
    pub organization_id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub phone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the organization half of a registration.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub phone: Option<String>,
    /// Defaults to `hvac` if omitted.
    pub industry: Option<String>,
}

/// DTO for inserting an organization user. `email` must already be
/// normalised and `password_hash` already computed.
#[derive(Debug, Clone)]
pub struct CreateOrganizationUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub phone: String,
}

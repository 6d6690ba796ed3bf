//! Repository for the `organization_users` table.

use routewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::organization::OrganizationUser;

/// Column list for `organization_users` queries.
pub(crate) const COLUMNS: &str = "\
    id, organization_id, email, password_hash, name, role, phone, \
    created_at, updated_at";

/// Provides lookups for organization users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by normalised email. Used by login only.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<OrganizationUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organization_users WHERE email = $1");
        sqlx::query_as::<_, OrganizationUser>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by id within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<OrganizationUser>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM organization_users WHERE id = $1 AND organization_id = $2"
        );
        sqlx::query_as::<_, OrganizationUser>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }
}

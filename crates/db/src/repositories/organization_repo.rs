//! Repository for the `organizations` table and registration.

use routewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::organization::{
    CreateOrganization, CreateOrganizationUser, Organization, OrganizationUser,
};

/// Column list for `organizations` queries.
const COLUMNS: &str = "id, name, phone, industry, created_at, updated_at";

/// Industry recorded when registration does not name one.
const DEFAULT_INDUSTRY: &str = "hvac";

/// Provides registration and lookup for organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Create an organization and its first user in one transaction.
    ///
    /// Either both rows exist afterwards or neither does.
    pub async fn register(
        pool: &PgPool,
        org: &CreateOrganization,
        user: &CreateOrganizationUser,
    ) -> Result<(Organization, OrganizationUser), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let org_query = format!(
            "INSERT INTO organizations (name, phone, industry) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let organization = sqlx::query_as::<_, Organization>(&org_query)
            .bind(&org.name)
            .bind(org.phone.as_deref().unwrap_or(""))
            .bind(
                org.industry
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(DEFAULT_INDUSTRY),
            )
            .fetch_one(&mut *tx)
            .await?;

        let user_query = format!(
            "INSERT INTO organization_users \
                (organization_id, email, password_hash, name, role, phone) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            super::user_repo::COLUMNS
        );
        let owner = sqlx::query_as::<_, OrganizationUser>(&user_query)
            .bind(organization.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(&user.role)
            .bind(&user.phone)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            organization_id = organization.id,
            user_id = owner.id,
            "Organization registered",
        );

        Ok((organization, owner))
    }

    /// Find an organization by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE id = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

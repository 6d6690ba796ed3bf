//! Repository for the `customers` table.

use routewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};

/// Column list for `customers` queries.
const COLUMNS: &str = "\
    id, organization_id, created_by, name, email, phone, address, \
    latitude, longitude, notes, created_at, updated_at";

/// Provides tenant-scoped CRUD operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer into the caller's organization.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        created_by: DbId,
        input: &CreateCustomer,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers \
                (organization_id, created_by, name, email, phone, address, latitude, longitude, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(organization_id)
            .bind(created_by)
            .bind(&input.name)
            .bind(input.email.as_deref())
            .bind(input.phone.as_deref().unwrap_or(""))
            .bind(input.address.as_deref().unwrap_or(""))
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.notes.as_deref().unwrap_or(""))
            .fetch_one(pool)
            .await
    }

    /// Find a customer by id within an organization.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customers WHERE id = $1 AND organization_id = $2"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a customer id belongs to the organization.
    pub async fn exists(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1 AND organization_id = $2)",
        )
        .bind(id)
        .bind(organization_id)
        .fetch_one(pool)
        .await
    }

    /// List customers in an organization ordered by name.
    ///
    /// `search` is a case-insensitive substring matched against name, phone
    /// and address. Blank search terms are ignored.
    pub async fn list(
        pool: &PgPool,
        organization_id: DbId,
        search: Option<&str>,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        match search {
            Some(term) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM customers \
                     WHERE organization_id = $1 \
                       AND (name ILIKE $2 OR phone ILIKE $2 OR address ILIKE $2) \
                     ORDER BY name, id"
                );
                sqlx::query_as::<_, Customer>(&query)
                    .bind(organization_id)
                    .bind(super::ilike_contains(term))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM customers WHERE organization_id = $1 ORDER BY name, id"
                );
                sqlx::query_as::<_, Customer>(&query)
                    .bind(organization_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Apply a partial update. Absent fields and an empty name keep the
    /// stored value.
    pub async fn update(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET \
                name = COALESCE(NULLIF($3, ''), name), \
                email = COALESCE($4, email), \
                phone = COALESCE($5, phone), \
                address = COALESCE($6, address), \
                latitude = COALESCE($7, latitude), \
                longitude = COALESCE($8, longitude), \
                notes = COALESCE($9, notes) \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(input.name.as_deref())
            .bind(input.email.as_deref())
            .bind(input.phone.as_deref())
            .bind(input.address.as_deref())
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.notes.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a customer. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while jobs still reference it.
    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

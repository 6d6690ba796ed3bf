//! Repository for the `technicians` table.

use routewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::technician::{CreateTechnician, Technician, UpdateTechnician};

/// Column list for `technicians` queries.
const COLUMNS: &str = "\
    id, organization_id, created_by, name, email, phone, is_active, \
    last_lat, last_lng, last_seen_at, created_at, updated_at";

/// Provides tenant-scoped CRUD operations for technicians.
pub struct TechnicianRepo;

impl TechnicianRepo {
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        created_by: DbId,
        input: &CreateTechnician,
    ) -> Result<Technician, sqlx::Error> {
        let query = format!(
            "INSERT INTO technicians (organization_id, created_by, name, email, phone, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Technician>(&query)
            .bind(organization_id)
            .bind(created_by)
            .bind(&input.name)
            .bind(input.email.as_deref())
            .bind(&input.phone)
            .bind(input.is_active.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Technician>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM technicians WHERE id = $1 AND organization_id = $2"
        );
        sqlx::query_as::<_, Technician>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a technician id belongs to the organization.
    pub async fn exists(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM technicians WHERE id = $1 AND organization_id = $2)",
        )
        .bind(id)
        .bind(organization_id)
        .fetch_one(pool)
        .await
    }

    /// List technicians ordered by name, optionally only active ones.
    pub async fn list(
        pool: &PgPool,
        organization_id: DbId,
        active_only: bool,
    ) -> Result<Vec<Technician>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM technicians \
             WHERE organization_id = $1 AND ($2 = false OR is_active) \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Technician>(&query)
            .bind(organization_id)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Partial update. Empty `name`/`phone` keep the stored value.
    pub async fn update(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        input: &UpdateTechnician,
    ) -> Result<Option<Technician>, sqlx::Error> {
        let query = format!(
            "UPDATE technicians SET \
                name = COALESCE(NULLIF($3, ''), name), \
                email = COALESCE($4, email), \
                phone = COALESCE(NULLIF($5, ''), phone), \
                is_active = COALESCE($6, is_active) \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Technician>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(input.name.as_deref())
            .bind(input.email.as_deref())
            .bind(input.phone.as_deref())
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Record the technician's last known position and stamp `last_seen_at`.
    pub async fn update_location(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        lat: f64,
        lng: f64,
    ) -> Result<Option<Technician>, sqlx::Error> {
        let query = format!(
            "UPDATE technicians SET last_lat = $3, last_lng = $4, last_seen_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Technician>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(lat)
            .bind(lng)
            .fetch_optional(pool)
            .await
    }

    /// Delete a technician. Jobs assigned to it become unassigned.
    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM technicians WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `workers` table.

use routewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::worker::{CreateWorker, UpdateWorker, Worker};

/// Column list for `workers` queries.
const COLUMNS: &str = "\
    id, organization_id, created_by, name, email, phone, is_active, \
    created_at, updated_at";

/// Provides tenant-scoped CRUD operations for field workers.
pub struct WorkerRepo;

impl WorkerRepo {
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        created_by: DbId,
        input: &CreateWorker,
    ) -> Result<Worker, sqlx::Error> {
        let query = format!(
            "INSERT INTO workers (organization_id, created_by, name, email, phone, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Worker>(&query)
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
    ) -> Result<Option<Worker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workers WHERE id = $1 AND organization_id = $2");
        sqlx::query_as::<_, Worker>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List workers ordered by name, optionally only active ones.
    pub async fn list(
        pool: &PgPool,
        organization_id: DbId,
        active_only: bool,
    ) -> Result<Vec<Worker>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workers \
             WHERE organization_id = $1 AND ($2 = false OR is_active) \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Worker>(&query)
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
        input: &UpdateWorker,
    ) -> Result<Option<Worker>, sqlx::Error> {
        let query = format!(
            "UPDATE workers SET \
                name = COALESCE(NULLIF($3, ''), name), \
                email = COALESCE($4, email), \
                phone = COALESCE(NULLIF($5, ''), phone), \
                is_active = COALESCE($6, is_active) \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Worker>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(input.name.as_deref())
            .bind(input.email.as_deref())
            .bind(input.phone.as_deref())
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workers WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

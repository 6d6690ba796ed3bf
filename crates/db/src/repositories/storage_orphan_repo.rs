//! Repository for the `storage_orphans` reconciliation table.

use routewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::storage_orphan::{CreateStorageOrphan, StorageOrphan};

const COLUMNS: &str = "\
    id, organization_id, job_id, file_id, storage_bucket, storage_key, \
    reason, resolved_at, created_at";

/// Records places where the object store and `project_files` disagree.
pub struct StorageOrphanRepo;

impl StorageOrphanRepo {
    pub async fn record(
        pool: &PgPool,
        input: &CreateStorageOrphan,
    ) -> Result<StorageOrphan, sqlx::Error> {
        let query = format!(
            "INSERT INTO storage_orphans \
                (organization_id, job_id, file_id, storage_bucket, storage_key, reason) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageOrphan>(&query)
            .bind(input.organization_id)
            .bind(input.job_id)
            .bind(input.file_id)
            .bind(&input.storage_bucket)
            .bind(&input.storage_key)
            .bind(input.reason)
            .fetch_one(pool)
            .await
    }

    /// Unresolved records for an organization, newest first.
    pub async fn list_unresolved(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<StorageOrphan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM storage_orphans \
             WHERE organization_id = $1 AND resolved_at IS NULL \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, StorageOrphan>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }
}

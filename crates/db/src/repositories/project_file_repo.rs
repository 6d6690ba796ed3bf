//! Repository for the `project_files` table.
//!
//! Rows carry no organization id; tenancy flows through the parent job.
//! Callers must confirm the job belongs to the caller's organization.

use routewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::project_file::{CreateProjectFile, ProjectFile};

/// Column list for `project_files` queries.
const COLUMNS: &str = "\
    id, job_id, uploaded_by_user, uploaded_by_worker, file_type, file_category, \
    file_name, original_file_name, mime_type, file_size, file_extension, \
    storage_bucket, storage_key, description, created_at, updated_at";

/// Provides metadata operations for job attachments.
pub struct ProjectFileRepo;

impl ProjectFileRepo {
    /// Insert the metadata row for an object that has already been stored.
    pub async fn create(pool: &PgPool, input: &CreateProjectFile) -> Result<ProjectFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_files \
                (job_id, uploaded_by_user, uploaded_by_worker, file_type, file_category, \
                 file_name, original_file_name, mime_type, file_size, file_extension, \
                 storage_bucket, storage_key, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectFile>(&query)
            .bind(input.job_id)
            .bind(input.uploaded_by_user)
            .bind(input.uploaded_by_worker)
            .bind(&input.file_type)
            .bind(input.file_category.as_deref())
            .bind(&input.file_name)
            .bind(&input.original_file_name)
            .bind(&input.mime_type)
            .bind(input.file_size)
            .bind(&input.file_extension)
            .bind(&input.storage_bucket)
            .bind(&input.storage_key)
            .bind(input.description.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find a file row by id alone.
    ///
    /// The caller compares the parent job's organization to its own so that
    /// a foreign file is reported as forbidden rather than missing.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_files WHERE id = $1");
        sqlx::query_as::<_, ProjectFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a job's files, newest first, optionally of one type.
    pub async fn list_by_job(
        pool: &PgPool,
        job_id: DbId,
        file_type: Option<&str>,
    ) -> Result<Vec<ProjectFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_files \
             WHERE job_id = $1 AND ($2::TEXT IS NULL OR file_type = $2) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ProjectFile>(&query)
            .bind(job_id)
            .bind(file_type)
            .fetch_all(pool)
            .await
    }

    /// Delete a file row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_files WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

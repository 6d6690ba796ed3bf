//! Repository for the `job_notes` table.

use routewise_core::tenancy::TenantScope;
use routewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::job_collection::{CreateJobNote, JobNote};

const COLUMNS: &str = "id, job_id, author_id, author_kind, body, created_at";

/// Append-only notes on a job. The job must be scope-checked first.
pub struct JobNoteRepo;

impl JobNoteRepo {
    /// Append a note authored by the calling actor.
    pub async fn create(
        pool: &PgPool,
        job_id: DbId,
        author: &TenantScope,
        input: &CreateJobNote,
    ) -> Result<JobNote, sqlx::Error> {
        let query = format!(
            "INSERT INTO job_notes (job_id, author_id, author_kind, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobNote>(&query)
            .bind(job_id)
            .bind(author.actor_id)
            .bind(author.kind.as_str())
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// List a job's notes, oldest first.
    pub async fn list_by_job(pool: &PgPool, job_id: DbId) -> Result<Vec<JobNote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM job_notes WHERE job_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, JobNote>(&query)
            .bind(job_id)
            .fetch_all(pool)
            .await
    }
}

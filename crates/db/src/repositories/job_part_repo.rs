//! Repository for the `job_parts` table.

use routewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::job_collection::{CreateJobPart, JobPart};

const COLUMNS: &str = "id, job_id, name, quantity, unit_price, created_at";

/// Parts used on a job. The job must be scope-checked first.
pub struct JobPartRepo;

impl JobPartRepo {
    pub async fn create(
        pool: &PgPool,
        job_id: DbId,
        input: &CreateJobPart,
    ) -> Result<JobPart, sqlx::Error> {
        let query = format!(
            "INSERT INTO job_parts (job_id, name, quantity, unit_price) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobPart>(&query)
            .bind(job_id)
            .bind(&input.name)
            .bind(input.quantity)
            .bind(input.unit_price)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_job(pool: &PgPool, job_id: DbId) -> Result<Vec<JobPart>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM job_parts WHERE job_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, JobPart>(&query)
            .bind(job_id)
            .fetch_all(pool)
            .await
    }
}

//! Repository for the `job_photos` table (externally hosted photo URLs).

use routewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::job_collection::{CreateJobPhoto, JobPhoto};

const COLUMNS: &str = "id, job_id, url, caption, created_at";

pub struct JobPhotoRepo;

impl JobPhotoRepo {
    pub async fn create(
        pool: &PgPool,
        job_id: DbId,
        input: &CreateJobPhoto,
    ) -> Result<JobPhoto, sqlx::Error> {
        let query = format!(
            "INSERT INTO job_photos (job_id, url, caption) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobPhoto>(&query)
            .bind(job_id)
            .bind(&input.url)
            .bind(input.caption.as_deref())
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_job(pool: &PgPool, job_id: DbId) -> Result<Vec<JobPhoto>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM job_photos WHERE job_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, JobPhoto>(&query)
            .bind(job_id)
            .fetch_all(pool)
            .await
    }
}

//! Repository for the `jobs` table.
//!
//! Every query filters by `organization_id`. The completion stamp is
//! applied in SQL against the row's previous status so that concurrent
//! transitions cannot both observe "not yet completed".

use routewise_core::job_status::{effective_duration, JobStatus};
use routewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::job::{CreateJob, Job, JobFilter, JobWithCustomer, UpdateJob};

/// Column list for `jobs` queries.
const COLUMNS: &str = "\
    id, organization_id, created_by, customer_id, technician_id, \
    title, description, status, scheduled_at, completed_at, \
    duration_minutes, price, metadata, created_at, updated_at";

/// Customer summary for each `jobs` row, read as one JSON column.
const CUSTOMER_COLUMN: &str = "\
    (SELECT json_build_object( \
        'id', c.id, 'name', c.name, 'email', c.email, 'phone', c.phone, \
        'address', c.address, 'latitude', c.latitude, 'longitude', c.longitude) \
     FROM customers c WHERE c.id = jobs.customer_id) AS customer";

/// `completed_at` expression for an UPDATE whose new status is bound at
/// the given placeholder. Column references see the pre-update row.
fn completed_at_expr(status_param: &str) -> String {
    format!(
        "CASE WHEN {status_param} = 'completed' AND status <> 'completed' \
              THEN NOW() ELSE completed_at END"
    )
}

/// Provides tenant-scoped CRUD and lifecycle operations for jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new job in `scheduled` status.
    ///
    /// A missing or non-positive duration becomes the 60 minute default.
    /// Customer and technician ownership must be checked by the caller.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        created_by: DbId,
        input: &CreateJob,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs \
                (organization_id, created_by, customer_id, technician_id, title, description, \
                 status, scheduled_at, duration_minutes, price, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(organization_id)
            .bind(created_by)
            .bind(input.customer_id)
            .bind(input.technician_id)
            .bind(&input.title)
            .bind(input.description.as_deref().unwrap_or(""))
            .bind(JobStatus::Scheduled.as_str())
            .bind(input.scheduled_at)
            .bind(effective_duration(input.duration_minutes))
            .bind(input.price)
            .bind(input.metadata.as_ref())
            .fetch_one(pool)
            .await
    }

    /// Find a job and its customer summary.
    pub async fn find_by_id(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<JobWithCustomer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {CUSTOMER_COLUMN} FROM jobs \
             WHERE id = $1 AND organization_id = $2"
        );
        sqlx::query_as::<_, JobWithCustomer>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a job id belongs to the organization.
    ///
    /// Gate for every job sub-resource (files, notes, parts, photos).
    pub async fn exists(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1 AND organization_id = $2)",
        )
        .bind(id)
        .bind(organization_id)
        .fetch_one(pool)
        .await
    }

    /// List jobs matching the conjunction of all supplied filters, each
    /// with its customer summary.
    pub async fn list(
        pool: &PgPool,
        organization_id: DbId,
        filter: &JobFilter,
    ) -> Result<Vec<JobWithCustomer>, sqlx::Error> {
        let mut conditions = vec!["organization_id = $1".to_string()];
        let mut bind_idx = 2u32;

        if filter.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.technician_id.is_some() {
            conditions.push(format!("technician_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.scheduled_date.is_some() {
            conditions.push(format!("(scheduled_at AT TIME ZONE 'UTC')::date = ${bind_idx}"));
        }

        let query = format!(
            "SELECT {COLUMNS}, {CUSTOMER_COLUMN} FROM jobs WHERE {} ORDER BY {}",
            conditions.join(" AND "),
            filter.sort.order_by(),
        );

        let mut q = sqlx::query_as::<_, JobWithCustomer>(&query).bind(organization_id);
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(technician_id) = filter.technician_id {
            q = q.bind(technician_id);
        }
        if let Some(date) = filter.scheduled_date {
            q = q.bind(date);
        }
        q.fetch_all(pool).await
    }

    /// Apply a partial update.
    ///
    /// `status` must already be validated; it passes through the same
    /// completion stamp as [`JobRepo::set_status`].
    pub async fn update(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        input: &UpdateJob,
        status: Option<JobStatus>,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET \
                customer_id = COALESCE($3, customer_id), \
                title = COALESCE(NULLIF($4, ''), title), \
                description = COALESCE($5, description), \
                scheduled_at = COALESCE($6, scheduled_at), \
                duration_minutes = COALESCE(NULLIF($7, 0), duration_minutes), \
                price = CASE WHEN $8 THEN $9 ELSE price END, \
                metadata = CASE WHEN $10 THEN $11 ELSE metadata END, \
                status = COALESCE($12, status), \
                completed_at = {completed_at} \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {COLUMNS}",
            completed_at = completed_at_expr("$12"),
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(input.customer_id)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(input.scheduled_at)
            .bind(input.duration_minutes)
            .bind(input.price.is_some())
            .bind(input.price.flatten())
            .bind(input.metadata.is_some())
            .bind(input.metadata.as_ref().and_then(|m| m.as_ref()))
            .bind(status.map(JobStatus::as_str))
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the assigned technician.
    pub async fn assign(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        technician_id: Option<DbId>,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET technician_id = $3 \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(technician_id)
            .fetch_optional(pool)
            .await
    }

    /// Move a job to `status`, stamping `completed_at` on entry into
    /// `completed`. Leaving `completed` never clears the stamp.
    pub async fn set_status(
        pool: &PgPool,
        organization_id: DbId,
        id: DbId,
        status: JobStatus,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET status = $3, completed_at = {completed_at} \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {COLUMNS}",
            completed_at = completed_at_expr("$3"),
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(organization_id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete a job. Files, notes, parts and photos are left in place.
    pub async fn delete(pool: &PgPool, organization_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::completed_at_expr;

    #[test]
    fn completion_stamp_compares_against_previous_status() {
        let expr = completed_at_expr("$3");
        assert!(expr.contains("$3 = 'completed'"));
        assert!(expr.contains("status <> 'completed'"));
        assert!(expr.ends_with("ELSE completed_at END"));
    }
}

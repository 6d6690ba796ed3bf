//! Job entity model and DTOs.

use chrono::NaiveDate;
use routewise_core::job_status::{JobSort, JobStatus};
use routewise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::explicit_null;

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub organization_id: DbId,
    pub created_by: DbId,
    pub customer_id: DbId,
    pub technician_id: Option<DbId>,
    pub title: String,
    pub description: String,
    /// One of `scheduled`, `in_progress`, `completed`, `cancelled`.
    pub status: String,
    pub scheduled_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub duration_minutes: i32,
    pub price: Option<f64>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Customer fields embedded in job reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCustomer {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A job together with a summary of its customer, as returned by
/// `GET /jobs` and `GET /jobs/{id}`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobWithCustomer {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: Job,
    #[sqlx(json)]
    pub customer: JobCustomer,
}

/// DTO for `POST /api/v1/jobs`.
///
/// There is no status field: new jobs always start `scheduled`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJob {
    pub customer_id: DbId,
    pub technician_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: Timestamp,
    /// `None` or `0` defaults to 60.
    pub duration_minutes: Option<i32>,
    pub price: Option<f64>,
    pub metadata: Option<serde_json::Value>,
}

/// DTO for `PUT /api/v1/jobs/{id}`.
///
/// `title` and `duration_minutes` treat empty/zero as "no change". `price`
/// and `metadata` distinguish absent (keep) from `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateJob {
    pub customer_id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub metadata: Option<Option<serde_json::Value>>,
}

/// DTO for `PATCH /api/v1/jobs/{id}/assign`. `null` unassigns.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignTechnician {
    pub technician_id: Option<DbId>,
}

/// DTO for `PATCH /api/v1/jobs/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateJobStatus {
    pub status: String,
}

/// Query parameters for `GET /api/v1/jobs`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobListQuery {
    pub status: Option<String>,
    pub technician_id: Option<DbId>,
    /// Calendar day (`YYYY-MM-DD`, UTC) matched against `scheduled_at`.
    #[serde(alias = "scheduled_date")]
    pub date: Option<NaiveDate>,
    /// `scheduled_at`, `status`, or anything else for `created_at DESC`.
    pub sort: Option<String>,
}

/// Validated conjunction of job list filters.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub technician_id: Option<DbId>,
    pub scheduled_date: Option<NaiveDate>,
    pub sort: JobSort,
}

//! Handlers for the `/jobs` resource and its lifecycle transitions.
//!
//! Reads are open to any token of the organization (field workers
//! included); mutations require an organization user.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use routewise_core::error::CoreError;
use routewise_core::job_status::{JobSort, JobStatus};
use routewise_core::types::DbId;
use routewise_core::validation::require_non_empty;
use routewise_db::models::job::{
    AssignTechnician, CreateJob, Job, JobFilter, JobListQuery, JobWithCustomer, UpdateJob,
    UpdateJobStatus,
};
use routewise_db::repositories::{CustomerRepo, JobRepo, TechnicianRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a job belongs to the organization.
pub(crate) async fn ensure_job_in_org(
    pool: &sqlx::PgPool,
    organization_id: DbId,
    job_id: DbId,
) -> AppResult<()> {
    if !JobRepo::exists(pool, organization_id, job_id).await? {
        return Err(AppError::Core(CoreError::not_found("Job", job_id)));
    }
    Ok(())
}

async fn ensure_customer_in_org(
    pool: &sqlx::PgPool,
    organization_id: DbId,
    customer_id: DbId,
) -> AppResult<()> {
    if !CustomerRepo::exists(pool, organization_id, customer_id).await? {
        return Err(AppError::Core(CoreError::not_found("Customer", customer_id)));
    }
    Ok(())
}

async fn ensure_technician_in_org(
    pool: &sqlx::PgPool,
    organization_id: DbId,
    technician_id: DbId,
) -> AppResult<()> {
    if !TechnicianRepo::exists(pool, organization_id, technician_id).await? {
        return Err(AppError::Core(CoreError::not_found(
            "Technician",
            technician_id,
        )));
    }
    Ok(())
}

fn reject_negative_duration(duration_minutes: Option<i32>) -> AppResult<()> {
    match duration_minutes {
        Some(d) if d < 0 => Err(AppError::Core(CoreError::Validation(
            "duration_minutes must not be negative".into(),
        ))),
        _ => Ok(()),
    }
}

fn job_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Job", id))
}

/// Turn raw query parameters into a validated filter.
fn build_filter(query: JobListQuery) -> AppResult<JobFilter> {
    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(JobStatus::parse)
        .transpose()?;

    Ok(JobFilter {
        status,
        technician_id: query.technician_id,
        scheduled_date: query.date,
        sort: JobSort::from_param(query.sort.as_deref()),
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs
///
/// Each job carries a `customer` summary. Optional filters: `status`, `technician_id`, `date` (UTC calendar day).
/// `sort` is `scheduled_at`, `status`, or omitted for newest first.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = build_filter(query)?;
    let items = JobRepo::list(&state.pool, auth.org_id(), &filter).await?;
    tracing::debug!(org_id = auth.org_id(), count = items.len(), "Listed jobs");
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/jobs
///
/// New jobs always start `scheduled`.
pub async fn create(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Json(input): Json<CreateJob>,
) -> AppResult<impl IntoResponse> {
    require_non_empty("title", &input.title)?;
    reject_negative_duration(input.duration_minutes)?;

    ensure_customer_in_org(&state.pool, auth.org_id(), input.customer_id).await?;
    if let Some(technician_id) = input.technician_id {
        ensure_technician_in_org(&state.pool, auth.org_id(), technician_id).await?;
    }

    let job = JobRepo::create(&state.pool, auth.org_id(), auth.actor_id(), &input).await?;
    tracing::info!(
        job_id = job.id,
        org_id = auth.org_id(),
        actor_id = auth.actor_id(),
        "Job created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

/// GET /api/v1/jobs/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<JobWithCustomer>>> {
    let job = JobRepo::find_by_id(&state.pool, auth.org_id(), id)
        .await?
        .ok_or_else(|| job_not_found(id))?;
    Ok(Json(DataResponse { data: job }))
}

/// PUT /api/v1/jobs/{id}
///
/// Partial update. An empty `title` or a zero `duration_minutes` keeps the
/// stored value; `price` and `metadata` may be cleared with `null`.
pub async fn update(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateJob>,
) -> AppResult<Json<DataResponse<Job>>> {
    reject_negative_duration(input.duration_minutes)?;
    let status = input.status.as_deref().map(JobStatus::parse).transpose()?;

    if let Some(customer_id) = input.customer_id {
        ensure_customer_in_org(&state.pool, auth.org_id(), customer_id).await?;
    }

    let job = JobRepo::update(&state.pool, auth.org_id(), id, &input, status)
        .await?
        .ok_or_else(|| job_not_found(id))?;
    tracing::info!(
        job_id = id,
        org_id = auth.org_id(),
        actor_id = auth.actor_id(),
        "Job updated",
    );
    Ok(Json(DataResponse { data: job }))
}

/// PATCH /api/v1/jobs/{id}/assign
///
/// `{"technician_id": null}` unassigns. Independent of status.
pub async fn assign(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignTechnician>,
) -> AppResult<Json<DataResponse<Job>>> {
    if let Some(technician_id) = input.technician_id {
        ensure_technician_in_org(&state.pool, auth.org_id(), technician_id).await?;
    }

    let job = JobRepo::assign(&state.pool, auth.org_id(), id, input.technician_id)
        .await?
        .ok_or_else(|| job_not_found(id))?;
    tracing::info!(
        job_id = id,
        org_id = auth.org_id(),
        technician_id = ?input.technician_id,
        "Job assignment changed",
    );
    Ok(Json(DataResponse { data: job }))
}

/// PATCH /api/v1/jobs/{id}/status
///
/// Entering `completed` stamps `completed_at` once; leaving it keeps the stamp.
pub async fn set_status(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateJobStatus>,
) -> AppResult<Json<DataResponse<Job>>> {
    let status = JobStatus::parse(&input.status)?;

    let job = JobRepo::set_status(&state.pool, auth.org_id(), id, status)
        .await?
        .ok_or_else(|| job_not_found(id))?;
    tracing::info!(
        job_id = id,
        org_id = auth.org_id(),
        actor_id = auth.actor_id(),
        status = status.as_str(),
        "Job status changed",
    );
    Ok(Json(DataResponse { data: job }))
}

/// DELETE /api/v1/jobs/{id}
pub async fn delete(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !JobRepo::delete(&state.pool, auth.org_id(), id).await? {
        return Err(job_not_found(id));
    }
    tracing::info!(job_id = id, org_id = auth.org_id(), "Job deleted");
    Ok(StatusCode::NO_CONTENT)
}

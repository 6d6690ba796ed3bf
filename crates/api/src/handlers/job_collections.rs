//! Handlers for append-only job sub-resources: notes, parts and photos.
//!
//! Each call checks that the job belongs to the caller's organization, then
//! runs the append or list as a separate statement.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use routewise_core::types::DbId;
use routewise_db::models::job_collection::{
    CreateJobNote, CreateJobPart, CreateJobPhoto, JobNote, JobPart, JobPhoto,
};
use routewise_db::repositories::{JobNoteRepo, JobPartRepo, JobPhotoRepo};
use validator::Validate;

use super::jobs::ensure_job_in_org;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{job_id}/notes
pub async fn list_notes(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<JobNote>>>> {
    ensure_job_in_org(&state.pool, auth.org_id(), job_id).await?;
    let notes = JobNoteRepo::list_by_job(&state.pool, job_id).await?;
    Ok(Json(DataResponse { data: notes }))
}

/// POST /api/v1/jobs/{job_id}/notes
pub async fn create_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
    Json(input): Json<CreateJobNote>,
) -> AppResult<(StatusCode, Json<DataResponse<JobNote>>)> {
    input.validate()?;
    ensure_job_in_org(&state.pool, auth.org_id(), job_id).await?;

    let note = JobNoteRepo::create(&state.pool, job_id, &auth.scope, &input).await?;
    tracing::info!(
        job_id,
        org_id = auth.org_id(),
        actor_id = auth.actor_id(),
        note_id = note.id,
        "Job note added",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: note })))
}

// ---------------------------------------------------------------------------
// Parts
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{job_id}/parts
pub async fn list_parts(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<JobPart>>>> {
    ensure_job_in_org(&state.pool, auth.org_id(), job_id).await?;
    let parts = JobPartRepo::list_by_job(&state.pool, job_id).await?;
    Ok(Json(DataResponse { data: parts }))
}

/// POST /api/v1/jobs/{job_id}/parts
pub async fn create_part(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
    Json(input): Json<CreateJobPart>,
) -> AppResult<(StatusCode, Json<DataResponse<JobPart>>)> {
    input.validate()?;
    ensure_job_in_org(&state.pool, auth.org_id(), job_id).await?;

    let part = JobPartRepo::create(&state.pool, job_id, &input).await?;
    tracing::info!(
        job_id,
        org_id = auth.org_id(),
        actor_id = auth.actor_id(),
        part_id = part.id,
        "Job part added",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: part })))
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{job_id}/photos
pub async fn list_photos(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<JobPhoto>>>> {
    ensure_job_in_org(&state.pool, auth.org_id(), job_id).await?;
    let photos = JobPhotoRepo::list_by_job(&state.pool, job_id).await?;
    Ok(Json(DataResponse { data: photos }))
}

/// POST /api/v1/jobs/{job_id}/photos
pub async fn create_photo(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
    Json(input): Json<CreateJobPhoto>,
) -> AppResult<(StatusCode, Json<DataResponse<JobPhoto>>)> {
    input.validate()?;
    ensure_job_in_org(&state.pool, auth.org_id(), job_id).await?;

    let photo = JobPhotoRepo::create(&state.pool, job_id, &input).await?;
    tracing::info!(
        job_id,
        org_id = auth.org_id(),
        actor_id = auth.actor_id(),
        photo_id = photo.id,
        "Job photo added",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: photo })))
}

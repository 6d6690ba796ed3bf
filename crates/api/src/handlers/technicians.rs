//! Handlers for the `/technicians` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use routewise_core::error::CoreError;
use routewise_core::types::DbId;
use routewise_core::validation::{require_non_empty, validate_coordinates};
use routewise_db::models::technician::{CreateTechnician, UpdateLocation, UpdateTechnician};
use routewise_db::repositories::TechnicianRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireUser;
use crate::query::ActiveOnlyParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/technicians
pub async fn list(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Query(params): Query<ActiveOnlyParams>,
) -> AppResult<impl IntoResponse> {
    let items = TechnicianRepo::list(&state.pool, auth.org_id(), params.active_only).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/technicians
pub async fn create(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTechnician>,
) -> AppResult<impl IntoResponse> {
    require_non_empty("name", &input.name)?;
    require_non_empty("phone", &input.phone)?;

    let technician =
        TechnicianRepo::create(&state.pool, auth.org_id(), auth.actor_id(), &input).await?;
    tracing::info!(
        org_id = auth.org_id(),
        actor_id = auth.actor_id(),
        technician_id = technician.id,
        "Technician created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: technician })))
}

/// GET /api/v1/technicians/{id}
pub async fn get_by_id(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let technician = TechnicianRepo::find_by_id(&state.pool, auth.org_id(), id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Technician", id)))?;
    Ok(Json(DataResponse { data: technician }))
}

/// PUT /api/v1/technicians/{id}
pub async fn update(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTechnician>,
) -> AppResult<impl IntoResponse> {
    let technician = TechnicianRepo::update(&state.pool, auth.org_id(), id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Technician", id)))?;
    tracing::info!(org_id = auth.org_id(), technician_id = id, "Technician updated");
    Ok(Json(DataResponse { data: technician }))
}

/// PUT /api/v1/technicians/{id}/location
///
/// Record the technician's last known position and stamp `last_seen_at`.
pub async fn update_location(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLocation>,
) -> AppResult<impl IntoResponse> {
    validate_coordinates(input.lat, input.lng)?;

    let technician =
        TechnicianRepo::update_location(&state.pool, auth.org_id(), id, input.lat, input.lng)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::not_found("Technician", id)))?;
    tracing::debug!(org_id = auth.org_id(), technician_id = id, "Technician location updated");
    Ok(Json(DataResponse { data: technician }))
}

/// DELETE /api/v1/technicians/{id}
///
/// Jobs assigned to the technician become unassigned.
pub async fn delete(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TechnicianRepo::delete(&state.pool, auth.org_id(), id).await? {
        return Err(AppError::Core(CoreError::not_found("Technician", id)));
    }
    tracing::info!(org_id = auth.org_id(), technician_id = id, "Technician deleted");
    Ok(StatusCode::NO_CONTENT)
}

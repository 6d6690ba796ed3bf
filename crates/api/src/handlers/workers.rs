//! Handlers for the `/workers` resource, including worker token issuance.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use routewise_core::error::CoreError;
use routewise_core::roles::ROLE_WORKER;
use routewise_core::tenancy::{ActorKind, TenantScope};
use routewise_core::types::DbId;
use routewise_core::validation::require_non_empty;
use routewise_db::models::worker::{CreateWorker, UpdateWorker, Worker};
use routewise_db::repositories::WorkerRepo;
use serde::Serialize;

use crate::auth::jwt::generate_token;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireManager, RequireUser};
use crate::query::ActiveOnlyParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `POST /workers/{id}/token`.
#[derive(Debug, Serialize)]
pub struct WorkerTokenResponse {
    pub token: String,
    pub expires_in: i64,
    pub worker: Worker,
}

/// GET /api/v1/workers
pub async fn list(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Query(params): Query<ActiveOnlyParams>,
) -> AppResult<impl IntoResponse> {
    let items = WorkerRepo::list(&state.pool, auth.org_id(), params.active_only).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/workers
pub async fn create(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWorker>,
) -> AppResult<impl IntoResponse> {
    require_non_empty("name", &input.name)?;
    require_non_empty("phone", &input.phone)?;

    let worker = WorkerRepo::create(&state.pool, auth.org_id(), auth.actor_id(), &input).await?;
    tracing::info!(
        org_id = auth.org_id(),
        actor_id = auth.actor_id(),
        worker_id = worker.id,
        "Worker created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: worker })))
}

/// GET /api/v1/workers/{id}
pub async fn get_by_id(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let worker = WorkerRepo::find_by_id(&state.pool, auth.org_id(), id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Worker", id)))?;
    Ok(Json(DataResponse { data: worker }))
}

/// PUT /api/v1/workers/{id}
pub async fn update(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWorker>,
) -> AppResult<impl IntoResponse> {
    let worker = WorkerRepo::update(&state.pool, auth.org_id(), id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Worker", id)))?;
    tracing::info!(org_id = auth.org_id(), worker_id = id, "Worker updated");
    Ok(Json(DataResponse { data: worker }))
}

/// DELETE /api/v1/workers/{id}
pub async fn delete(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !WorkerRepo::delete(&state.pool, auth.org_id(), id).await? {
        return Err(AppError::Core(CoreError::not_found("Worker", id)));
    }
    tracing::info!(org_id = auth.org_id(), worker_id = id, "Worker deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/workers/{id}/token
///
/// Issue a field-app token for an active worker of the caller's
/// organization. Owner or admin only.
pub async fn issue_token(
    RequireManager(auth): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<WorkerTokenResponse>> {
    let worker = WorkerRepo::find_by_id(&state.pool, auth.org_id(), id)
        .await?
        .filter(|w| w.is_active)
        .ok_or_else(|| AppError::Core(CoreError::not_found("Worker", id)))?;

    let scope = TenantScope {
        organization_id: worker.organization_id,
        actor_id: worker.id,
        role: ROLE_WORKER.to_string(),
        kind: ActorKind::Worker,
    };
    let token = generate_token(&scope, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(
        org_id = auth.org_id(),
        actor_id = auth.actor_id(),
        worker_id = worker.id,
        "Worker token issued",
    );
    Ok(Json(WorkerTokenResponse {
        token,
        expires_in: state.config.jwt.expires_in(),
        worker,
    }))
}

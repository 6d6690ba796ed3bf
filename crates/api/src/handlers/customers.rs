//! Handlers for the `/customers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use routewise_core::error::CoreError;
use routewise_core::types::DbId;
use routewise_core::validation::{require_non_empty, validate_coordinates};
use routewise_db::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use routewise_db::repositories::CustomerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_customer_exists(
    pool: &sqlx::PgPool,
    organization_id: DbId,
    id: DbId,
) -> AppResult<Customer> {
    CustomerRepo::find_by_id(pool, organization_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Customer", id)))
}

fn validate_optional_coordinates(lat: Option<f64>, lng: Option<f64>) -> AppResult<()> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(validate_coordinates(lat, lng)?),
        (None, None) => Ok(()),
        _ => Err(AppError::Core(CoreError::Validation(
            "latitude and longitude must be provided together".into(),
        ))),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/customers
///
/// Ordered by name. `?search=` matches name, phone or address (case-insensitive).
pub async fn list(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let search = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let items = CustomerRepo::list(&state.pool, auth.org_id(), search).await?;
    tracing::debug!(org_id = auth.org_id(), count = items.len(), "Listed customers");
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/customers
pub async fn create(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCustomer>,
) -> AppResult<impl IntoResponse> {
    require_non_empty("name", &input.name)?;
    validate_optional_coordinates(input.latitude, input.longitude)?;

    let customer = CustomerRepo::create(&state.pool, auth.org_id(), auth.actor_id(), &input).await?;
    tracing::info!(
        org_id = auth.org_id(),
        actor_id = auth.actor_id(),
        customer_id = customer.id,
        "Customer created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}

/// GET /api/v1/customers/{id}
pub async fn get_by_id(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let customer = ensure_customer_exists(&state.pool, auth.org_id(), id).await?;
    Ok(Json(DataResponse { data: customer }))
}

/// PUT /api/v1/customers/{id}
///
/// Partial update; omitted fields and an empty `name` keep their values.
/// Coordinates change only as a pair.
pub async fn update(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCustomer>,
) -> AppResult<impl IntoResponse> {
    validate_optional_coordinates(input.latitude, input.longitude)?;

    let customer = CustomerRepo::update(&state.pool, auth.org_id(), id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Customer", id)))?;
    tracing::info!(org_id = auth.org_id(), customer_id = id, "Customer updated");
    Ok(Json(DataResponse { data: customer }))
}

/// DELETE /api/v1/customers/{id}
///
/// A customer that still has jobs is rejected with 409.
pub async fn delete(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CustomerRepo::delete(&state.pool, auth.org_id(), id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Customer", id)));
    }
    tracing::info!(org_id = auth.org_id(), customer_id = id, "Customer deleted");
    Ok(StatusCode::NO_CONTENT)
}

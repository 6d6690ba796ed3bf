//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use routewise_core::error::CoreError;
use routewise_core::roles::ROLE_OWNER;
use routewise_core::tenancy::{ActorKind, TenantScope};
use routewise_core::validation::normalize_email;
use routewise_db::models::organization::{
    CreateOrganization, CreateOrganizationUser, Organization, OrganizationUser,
};
use routewise_db::repositories::{OrganizationRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireUser;
use crate::state::AppState;

/// Same message for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub industry: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: OrganizationUser,
    pub organization: Organization,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: OrganizationUser,
    pub organization: Organization,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an organization and its owner in one transaction.
pub async fn register(
    State(state): State<AppState>,
    Json(mut input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.email = normalize_email(&input.email);
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let org = CreateOrganization {
        name: input.company_name.trim().to_string(),
        phone: input.phone.clone(),
        industry: input.industry,
    };
    let owner = CreateOrganizationUser {
        email: input.email,
        password_hash,
        name: input.name.unwrap_or_default(),
        role: ROLE_OWNER.to_string(),
        phone: input.phone.unwrap_or_default(),
    };

    let (organization, user) = OrganizationRepo::register(&state.pool, &org, &owner).await?;

    tracing::info!(
        org_id = organization.id,
        user_id = user.id,
        "Organization registered",
    );

    let response = auth_response(&state, user, organization)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&input.email);

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let organization = OrganizationRepo::find_by_id(&state.pool, user.organization_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("User {} has no organization", user.id))
        })?;

    tracing::info!(org_id = organization.id, user_id = user.id, "User logged in");

    Ok(Json(auth_response(&state, user, organization)?))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    RequireUser(auth): RequireUser,
) -> AppResult<Json<MeResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.org_id(), auth.actor_id())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let organization = OrganizationRepo::find_by_id(&state.pool, auth.org_id())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Organization", auth.org_id())))?;

    Ok(Json(MeResponse { user, organization }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_response(
    state: &AppState,
    user: OrganizationUser,
    organization: Organization,
) -> AppResult<AuthResponse> {
    let scope = TenantScope {
        organization_id: organization.id,
        actor_id: user.id,
        role: user.role.clone(),
        kind: ActorKind::User,
    };
    let token = generate_token(&scope, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        token,
        expires_in: state.config.jwt.expires_in(),
        user,
        organization,
    })
}

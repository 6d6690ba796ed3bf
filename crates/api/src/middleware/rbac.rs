//! Role policy extractors layered on top of [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use routewise_core::error::CoreError;
use routewise_core::roles::{is_manager, is_user_role};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an organization-user token. Worker tokens get 403.
///
/// ```ignore
/// async fn dispatcher_only(RequireUser(user): RequireUser) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireUser(pub AuthUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.scope.is_worker() || !is_user_role(&user.scope.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Field workers cannot access this resource".into(),
            )));
        }
        Ok(RequireUser(user))
    }
}

/// Requires an `owner` or `admin` organization user.
pub struct RequireManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(user) = RequireUser::from_request_parts(parts, state).await?;
        if !is_manager(&user.scope.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Owner or Admin role required".into(),
            )));
        }
        Ok(RequireManager(user))
    }
}

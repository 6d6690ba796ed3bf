//! Organization administration endpoints (owner/admin only).

use axum::extract::State;
use axum::Json;
use routewise_db::models::storage_orphan::StorageOrphan;
use routewise_db::repositories::StorageOrphanRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/storage-orphans
///
/// Unresolved object-store / metadata divergences, newest first.
pub async fn list_storage_orphans(
    RequireManager(auth): RequireManager,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<StorageOrphan>>>> {
    let orphans = StorageOrphanRepo::list_unresolved(&state.pool, auth.org_id()).await?;
    if !orphans.is_empty() {
        tracing::warn!(
            org_id = auth.org_id(),
            count = orphans.len(),
            "Unresolved storage orphans",
        );
    }
    Ok(Json(DataResponse { data: orphans }))
}

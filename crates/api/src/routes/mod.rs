pub mod admin;
pub mod auth;
pub mod customers;
pub mod files;
pub mod health;
pub mod jobs;
pub mod technicians;
pub mod workers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register organization + owner (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current user + organization
///
/// /customers                                       list (?search=), create
/// /customers/{id}                                  get, update, delete
///
/// /technicians                                     list (?active_only=), create
/// /technicians/{id}                                get, update, delete
/// /technicians/{id}/location                       update last known position (PUT)
///
/// /workers                                         list (?active_only=), create
/// /workers/{id}                                    get, update, delete
/// /workers/{id}/token                              issue field-app token (POST, owner/admin)
///
/// /jobs                                            list (?status=&technician_id=&date=&sort=), create
/// /jobs/{id}                                       get, update, delete
/// /jobs/{id}/assign                                assign or unassign technician (PATCH)
/// /jobs/{id}/status                                change status (PATCH)
/// /jobs/{id}/files                                 list (?type=), upload (multipart)
/// /jobs/{id}/notes                                 list, append
/// /jobs/{id}/parts                                 list, append
/// /jobs/{id}/photos                                list, append
///
/// /files/{id}                                      get (signed URL), delete
///
/// /admin/storage-orphans                           unresolved storage divergences (owner/admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration and login.
        .nest("/auth", auth::router())
        // Dispatcher-managed resources.
        .nest("/customers", customers::router())
        .nest("/technicians", technicians::router())
        .nest("/workers", workers::router())
        // Jobs, lifecycle transitions and job-scoped collections.
        .nest("/jobs", jobs::router())
        // File attachments addressed by id.
        .nest("/files", files::router())
        // Organization administration.
        .nest("/admin", admin::router())
}

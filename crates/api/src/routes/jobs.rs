//! Route definitions for `/jobs` and its nested collections.
//!
//! ```text
//! GET    /                              list (?status=&technician_id=&date=&sort=)
//! POST   /                              create
//! GET    /{id}                          get_by_id
//! PUT    /{id}                          update
//! DELETE /{id}                          delete
//! PATCH  /{id}/assign                   assign
//! PATCH  /{id}/status                   set_status
//! GET    /{id}/files                    files::list_by_job (?type=)
//! POST   /{id}/files                    files::upload (multipart)
//! GET    /{id}/notes                    list_notes
//! POST   /{id}/notes                    create_note
//! GET    /{id}/parts                    list_parts
//! POST   /{id}/parts                    create_part
//! GET    /{id}/photos                   list_photos
//! POST   /{id}/photos                   create_photo
//! ```

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::files::{self, MAX_UPLOAD_BYTES};
use crate::handlers::{job_collections, jobs};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list).post(jobs::create))
        .route(
            "/{id}",
            get(jobs::get_by_id).put(jobs::update).delete(jobs::delete),
        )
        .route("/{id}/assign", patch(jobs::assign))
        .route("/{id}/status", patch(jobs::set_status))
        .route(
            "/{id}/files",
            get(files::list_by_job)
                .post(files::upload)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/{id}/notes",
            get(job_collections::list_notes).post(job_collections::create_note),
        )
        .route(
            "/{id}/parts",
            get(job_collections::list_parts).post(job_collections::create_part),
        )
        .route(
            "/{id}/photos",
            get(job_collections::list_photos).post(job_collections::create_photo),
        )
}

//! Route definitions for `/files`.
//!
//! Upload and listing live under `/jobs/{id}/files`.
//!
//! ```text
//! GET    /{id}                          get_by_id
//! DELETE /{id}                          delete
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::files;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(files::get_by_id).delete(files::delete))
}

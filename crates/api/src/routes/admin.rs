//! Route definitions for `/admin`.
//!
//! ```text
//! GET    /storage-orphans               list_storage_orphans
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/storage-orphans", get(admin::list_storage_orphans))
}

//! Route definitions for `/workers`.
//!
//! ```text
//! GET    /                              list (?active_only=)
//! POST   /                              create
//! GET    /{id}                          get_by_id
//! PUT    /{id}                          update
//! DELETE /{id}                          delete
//! POST   /{id}/token                    issue_token (owner/admin)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::workers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workers::list).post(workers::create))
        .route(
            "/{id}",
            get(workers::get_by_id)
                .put(workers::update)
                .delete(workers::delete),
        )
        .route("/{id}/token", post(workers::issue_token))
}

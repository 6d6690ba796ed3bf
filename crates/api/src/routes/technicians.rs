//! Route definitions for `/technicians`.
//!
//! ```text
//! GET    /                              list (?active_only=)
//! POST   /                              create
//! GET    /{id}                          get_by_id
//! PUT    /{id}                          update
//! DELETE /{id}                          delete
//! PUT    /{id}/location                 update_location
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::technicians;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(technicians::list).post(technicians::create))
        .route(
            "/{id}",
            get(technicians::get_by_id)
                .put(technicians::update)
                .delete(technicians::delete),
        )
        .route("/{id}/location", put(technicians::update_location))
}

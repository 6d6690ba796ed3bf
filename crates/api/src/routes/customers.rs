//! Route definitions for `/customers`.
//!
//! ```text
//! GET    /                              list (?search=)
//! POST   /                              create
//! GET    /{id}                          get_by_id
//! PUT    /{id}                          update
//! DELETE /{id}                          delete
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::customers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::list).post(customers::create))
        .route(
            "/{id}",
            get(customers::get_by_id)
                .put(customers::update)
                .delete(customers::delete),
        )
}

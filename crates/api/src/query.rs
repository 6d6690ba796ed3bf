//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?active_only=` for technician and worker listings.
#[derive(Debug, Default, Deserialize)]
pub struct ActiveOnlyParams {
    #[serde(default)]
    pub active_only: bool,
}

/// `?search=` free-text filter.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

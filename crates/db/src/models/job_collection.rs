//! Append-only job sub-resources: notes, parts and photo URLs.

use routewise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `job_notes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobNote {
    pub id: DbId,
    pub job_id: DbId,
    pub author_id: DbId,
    /// `user` or `worker`.
    pub author_kind: String,
    pub body: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobNote {
    #[validate(length(min = 1, message = "Note body must not be empty"))]
    pub body: String,
}

/// A row from the `job_parts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobPart {
    pub id: DbId,
    pub job_id: DbId,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Option<f64>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobPart {
    #[validate(length(min = 1, message = "Part name must not be empty"))]
    pub name: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(range(min = 0.0, message = "Unit price must not be negative"))]
    pub unit_price: Option<f64>,
}

/// A row from the `job_photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobPhoto {
    pub id: DbId,
    pub job_id: DbId,
    pub url: String,
    pub caption: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobPhoto {
    #[validate(url(message = "Photo url must be a valid URL"))]
    pub url: String,
    pub caption: Option<String>,
}

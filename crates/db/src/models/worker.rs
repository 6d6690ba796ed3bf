//! Worker entity model and DTOs.

use routewise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `workers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Worker {
    pub id: DbId,
    pub organization_id: DbId,
    pub created_by: Option<DbId>,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a worker.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorker {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub is_active: Option<bool>,
}

/// DTO for updating a worker. Empty `name`/`phone` mean "no change".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorker {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

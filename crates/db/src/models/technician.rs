//! Technician entity model and DTOs.

use routewise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `technicians` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Technician {
    pub id: DbId,
    pub organization_id: DbId,
    pub created_by: Option<DbId>,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub is_active: bool,
    pub last_lat: Option<f64>,
    pub last_lng: Option<f64>,
    pub last_seen_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a technician.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTechnician {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating a technician. Empty `name`/`phone` mean "no change".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTechnician {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

/// DTO for `PUT /technicians/{id}/location`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLocation {
    pub lat: f64,
    pub lng: f64,
}

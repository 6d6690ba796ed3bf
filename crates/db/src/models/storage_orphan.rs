//! Reconciliation records for object-store / metadata divergence.

use routewise_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// The compensating delete after a failed metadata insert also failed;
/// the object exists with no metadata row.
pub const REASON_COMPENSATING_DELETE_FAILED: &str = "compensating_delete_failed";

/// The object was deleted but the metadata row could not be; the row
/// points at nothing.
pub const REASON_METADATA_DELETE_FAILED: &str = "metadata_delete_failed";

/// A row from the `storage_orphans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StorageOrphan {
    pub id: DbId,
    pub organization_id: DbId,
    pub job_id: Option<DbId>,
    pub file_id: Option<DbId>,
    pub storage_bucket: String,
    pub storage_key: String,
    pub reason: String,
    pub resolved_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for recording a divergence.
#[derive(Debug, Clone)]
pub struct CreateStorageOrphan {
    pub organization_id: DbId,
    pub job_id: Option<DbId>,
    pub file_id: Option<DbId>,
    pub storage_bucket: String,
    pub storage_key: String,
    pub reason: &'static str,
}

//! Project file (job attachment) metadata model.

use routewise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `project_files` table.
///
/// Describes an object in the object store; the bytes are never stored here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectFile {
    pub id: DbId,
    pub job_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by_user: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by_worker: Option<DbId>,
    pub file_type: String,
    pub file_category: Option<String>,
    pub file_name: String,
    pub original_file_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub file_extension: String,
    pub storage_bucket: String,
    pub storage_key: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A file row plus a freshly signed, time-limited download URL.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectFileWithUrl {
    #[serde(flatten)]
    pub file: ProjectFile,
    pub url: Option<String>,
}

/// DTO for inserting file metadata after the object has been written.
#[derive(Debug, Clone)]
pub struct CreateProjectFile {
    pub job_id: DbId,
    pub uploaded_by_user: Option<DbId>,
    pub uploaded_by_worker: Option<DbId>,
    pub file_type: String,
    pub file_category: Option<String>,
    pub file_name: String,
    pub original_file_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub file_extension: String,
    pub storage_bucket: String,
    pub storage_key: String,
    pub description: Option<String>,
}

/// Query parameters for `GET /api/v1/jobs/{id}/files`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFileListQuery {
    /// `photo` or `document`.
    #[serde(rename = "type")]
    pub file_type: Option<String>,
}

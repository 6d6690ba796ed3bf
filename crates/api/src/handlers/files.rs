//! Handlers for job file attachments.
//!
//! Files are nested under jobs for upload and listing
//! (`/jobs/{job_id}/files`) and addressed directly by id for
//! retrieval and deletion (`/files/{id}`).

use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use routewise_core::types::DbId;
use routewise_db::models::project_file::{ProjectFileListQuery, ProjectFileWithUrl};
use routewise_storage::UploadRequest;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Largest accepted multipart body.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Content type assumed when the file part carries none.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

struct FilePart {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// POST /api/v1/jobs/{job_id}/files
///
/// Multipart fields: `file` (required), `category`, `description`.
pub async fn upload(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectFileWithUrl>>)> {
    let mut file: Option<FilePart> = None;
    let mut category: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_CONTENT_TYPE)
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some(FilePart {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "category" => category = non_blank(read_text(field).await?),
            "description" => description = non_blank(read_text(field).await?),
            _ => {}
        }
    }

    let file =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let created = state
        .attachments
        .upload(
            &auth.scope,
            UploadRequest {
                job_id,
                bytes: file.bytes,
                mime_type: file.content_type,
                original_file_name: file.file_name,
                category,
                description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/jobs/{job_id}/files
///
/// Newest first, each with a one-hour signed URL. `?type=photo|document`.
pub async fn list_by_job(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
    Query(query): Query<ProjectFileListQuery>,
) -> AppResult<Json<DataResponse<Vec<ProjectFileWithUrl>>>> {
    let files = state
        .attachments
        .list(&auth.scope, job_id, query.file_type.as_deref())
        .await?;
    Ok(Json(DataResponse { data: files }))
}

/// GET /api/v1/files/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectFileWithUrl>>> {
    let file = state.attachments.get(&auth.scope, id).await?;
    Ok(Json(DataResponse { data: file }))
}

/// DELETE /api/v1/files/{id}
///
/// Removes the stored object, then the metadata row.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.attachments.delete(&auth.scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn read_text(field: Field<'_>) -> AppResult<String> {
    let name = field.name().unwrap_or("").to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid '{name}' field: {e}")))
}

fn non_blank(text: String) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

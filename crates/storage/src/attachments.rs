//! Job attachment protocol.
//!
//! A `project_files` row exists iff its object exists in the store. Writes
//! go object-first, then metadata; deletes go object-first, then metadata.
//! When the second step fails the first is undone where possible, and any
//! divergence that cannot be undone is written to `storage_orphans`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use routewise_core::attachments::{
    classify_mime, file_extension, sanitize_filename, storage_key, SIGNED_URL_TTL,
};
use routewise_core::error::CoreError;
use routewise_core::tenancy::TenantScope;
use routewise_core::types::DbId;
use routewise_db::models::project_file::{CreateProjectFile, ProjectFile, ProjectFileWithUrl};
use routewise_db::models::storage_orphan::{
    CreateStorageOrphan, REASON_COMPENSATING_DELETE_FAILED, REASON_METADATA_DELETE_FAILED,
};
use routewise_db::repositories::{JobRepo, ProjectFileRepo, StorageOrphanRepo};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StorageError;
use crate::store::ObjectStore;

/// Default bound on a single object-store call.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// A file received from a client, ready to be stored against a job.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub job_id: DbId,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub original_file_name: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Coordinates the object store and file metadata.
#[derive(Clone)]
pub struct AttachmentService {
    pool: PgPool,
    store: Arc<dyn ObjectStore>,
    timeout: Duration,
}

impl AttachmentService {
    pub fn new(pool: PgPool, store: Arc<dyn ObjectStore>, timeout: Duration) -> Self {
        Self {
            pool,
            store,
            timeout,
        }
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Store a file against a job and record its metadata.
    ///
    /// On any failure after the object may have been written, including a
    /// timed-out put, the object is removed again before the error is
    /// returned.
    pub async fn upload(
        &self,
        scope: &TenantScope,
        request: UploadRequest,
    ) -> Result<ProjectFileWithUrl, CoreError> {
        self.ensure_job_in_scope(scope, request.job_id).await?;

        let file_type = classify_mime(&request.mime_type)?;
        if request.bytes.is_empty() {
            return Err(CoreError::Validation("Uploaded file is empty".to_string()));
        }

        let file_name = sanitize_filename(&request.original_file_name);
        let key = storage_key(
            scope.organization_id,
            request.job_id,
            file_type,
            Utc::now(),
            Uuid::new_v4(),
            &request.original_file_name,
        );
        let file_size = request.bytes.len() as i64;

        if let Err(e) = self
            .timed("put", self.store.put(&key, request.bytes, &request.mime_type))
            .await
        {
            // A timed-out put may still land in the store.
            if matches!(e, StorageError::Timeout { .. }) {
                self.compensate_failed_upload(scope, request.job_id, &key).await;
            }
            return Err(internal("Failed to store uploaded file", e));
        }

        let (uploaded_by_user, uploaded_by_worker) = scope.uploader_columns();
        let input = CreateProjectFile {
            job_id: request.job_id,
            uploaded_by_user,
            uploaded_by_worker,
            file_type: file_type.as_str().to_string(),
            file_category: request.category.filter(|c| !c.trim().is_empty()),
            file_extension: file_extension(&file_name),
            file_name,
            original_file_name: request.original_file_name,
            mime_type: request.mime_type,
            file_size,
            storage_bucket: self.store.bucket().to_string(),
            storage_key: key.clone(),
            description: request.description.filter(|d| !d.trim().is_empty()),
        };

        let file = match ProjectFileRepo::create(&self.pool, &input).await {
            Ok(file) => file,
            Err(db_err) => {
                self.compensate_failed_upload(scope, request.job_id, &key).await;
                return Err(internal("Failed to record uploaded file", db_err));
            }
        };

        tracing::info!(
            org_id = scope.organization_id,
            actor_id = scope.actor_id,
            job_id = file.job_id,
            file_id = file.id,
            file_type = %file.file_type,
            file_size = file.file_size,
            "File uploaded",
        );

        Ok(self.with_url_or_null(file).await)
    }

    /// List a job's files with freshly signed URLs, newest first.
    ///
    /// A row whose URL cannot be signed is returned with `url: null`.
    pub async fn list(
        &self,
        scope: &TenantScope,
        job_id: DbId,
        file_type: Option<&str>,
    ) -> Result<Vec<ProjectFileWithUrl>, CoreError> {
        self.ensure_job_in_scope(scope, job_id).await?;

        let files = ProjectFileRepo::list_by_job(&self.pool, job_id, file_type)
            .await
            .map_err(|e| internal("Failed to list files", e))?;

        let mut out = Vec::with_capacity(files.len());
        for file in files {
            out.push(self.with_url_or_null(file).await);
        }
        Ok(out)
    }

    /// Fetch one file with a signed URL.
    pub async fn get(&self, scope: &TenantScope, file_id: DbId) -> Result<ProjectFileWithUrl, CoreError> {
        let file = self.find_owned(scope, file_id).await?;
        let url = self
            .sign(&file)
            .await
            .map_err(|e| internal("Failed to sign file URL", e))?;
        Ok(ProjectFileWithUrl {
            file,
            url: Some(url),
        })
    }

    /// Delete a file's object, then its metadata row.
    pub async fn delete(&self, scope: &TenantScope, file_id: DbId) -> Result<(), CoreError> {
        let file = self.find_owned(scope, file_id).await?;

        self.timed("delete", self.store.delete(&file.storage_key))
            .await
            .map_err(|e| internal("Failed to delete stored file", e))?;

        match ProjectFileRepo::delete(&self.pool, file.id).await {
            Ok(_) => {
                tracing::info!(
                    org_id = scope.organization_id,
                    actor_id = scope.actor_id,
                    job_id = file.job_id,
                    file_id = file.id,
                    "File deleted",
                );
                Ok(())
            }
            Err(db_err) => {
                tracing::error!(
                    file_id = file.id,
                    storage_key = %file.storage_key,
                    error = %db_err,
                    "Object deleted but metadata row remains",
                );
                self.record_orphan(CreateStorageOrphan {
                    organization_id: scope.organization_id,
                    job_id: Some(file.job_id),
                    file_id: Some(file.id),
                    storage_bucket: file.storage_bucket.clone(),
                    storage_key: file.storage_key.clone(),
                    reason: REASON_METADATA_DELETE_FAILED,
                })
                .await;
                Err(internal("Failed to delete file record", db_err))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn ensure_job_in_scope(&self, scope: &TenantScope, job_id: DbId) -> Result<(), CoreError> {
        let exists = JobRepo::exists(&self.pool, scope.organization_id, job_id)
            .await
            .map_err(|e| internal("Failed to look up job", e))?;
        if exists {
            Ok(())
        } else {
            Err(CoreError::not_found("Job", job_id))
        }
    }

    /// Load a file by id and require its job to belong to the caller.
    ///
    /// A missing file is `NotFound`; a file under another organization's
    /// job is `Forbidden`.
    async fn find_owned(&self, scope: &TenantScope, file_id: DbId) -> Result<ProjectFile, CoreError> {
        let file = ProjectFileRepo::find_by_id(&self.pool, file_id)
            .await
            .map_err(|e| internal("Failed to look up file", e))?
            .ok_or_else(|| CoreError::not_found("File", file_id))?;

        let owned = JobRepo::exists(&self.pool, scope.organization_id, file.job_id)
            .await
            .map_err(|e| internal("Failed to look up job", e))?;
        if !owned {
            return Err(CoreError::Forbidden(
                "File does not belong to your organization".to_string(),
            ));
        }
        Ok(file)
    }

    async fn compensate_failed_upload(&self, scope: &TenantScope, job_id: DbId, key: &str) {
        match self.timed("delete", self.store.delete(key)).await {
            Ok(()) => {
                tracing::warn!(job_id, storage_key = %key, "Removed object after failed upload");
            }
            Err(e) => {
                tracing::error!(
                    job_id,
                    storage_key = %key,
                    error = %e,
                    "Compensating delete failed; object is orphaned",
                );
                self.record_orphan(CreateStorageOrphan {
                    organization_id: scope.organization_id,
                    job_id: Some(job_id),
                    file_id: None,
                    storage_bucket: self.store.bucket().to_string(),
                    storage_key: key.to_string(),
                    reason: REASON_COMPENSATING_DELETE_FAILED,
                })
                .await;
            }
        }
    }

    /// Best effort: a failure here is logged and otherwise ignored.
    async fn record_orphan(&self, orphan: CreateStorageOrphan) {
        if let Err(e) = StorageOrphanRepo::record(&self.pool, &orphan).await {
            tracing::error!(
                storage_key = %orphan.storage_key,
                reason = orphan.reason,
                error = %e,
                "Failed to record storage orphan",
            );
        }
    }

    async fn sign(&self, file: &ProjectFile) -> Result<String, StorageError> {
        self.timed("sign", self.store.sign_get(&file.storage_key, SIGNED_URL_TTL))
            .await
    }

    async fn with_url_or_null(&self, file: ProjectFile) -> ProjectFileWithUrl {
        let url = match self.sign(&file).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(file_id = file.id, error = %e, "Failed to sign file URL");
                None
            }
        };
        ProjectFileWithUrl { file, url }
    }

    async fn timed<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, StorageError>>,
    ) -> Result<T, StorageError> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .unwrap_or(Err(StorageError::Timeout {
                operation,
                after: self.timeout,
            }))
    }
}

/// Log an infrastructure failure and convert it to an opaque internal error.
fn internal(context: &str, err: impl std::fmt::Display) -> CoreError {
    tracing::error!(error = %err, "{context}");
    CoreError::Internal(format!("{context}: {err}"))
}

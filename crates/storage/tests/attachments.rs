//! Attachment protocol against a real database and the memory store.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use chrono::Utc;
use routewise_core::error::CoreError;
use routewise_core::tenancy::{ActorKind, TenantScope};
use routewise_core::types::DbId;
use routewise_db::models::customer::CreateCustomer;
use routewise_db::models::job::CreateJob;
use routewise_db::models::organization::{CreateOrganization, CreateOrganizationUser};
use routewise_db::repositories::{CustomerRepo, JobRepo, OrganizationRepo, StorageOrphanRepo};
use routewise_storage::{AttachmentService, MemoryObjectStore, ObjectStore, UploadRequest};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn tenant_with_job(pool: &PgPool, email: &str) -> (TenantScope, DbId) {
    let org = CreateOrganization {
        name: format!("Org of {email}"),
        phone: None,
        industry: None,
    };
    let user = CreateOrganizationUser {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        name: "Owner".to_string(),
        role: "owner".to_string(),
        phone: String::new(),
    };
    let (organization, owner) = OrganizationRepo::register(pool, &org, &user).await.unwrap();

    let customer = CustomerRepo::create(
        pool,
        organization.id,
        owner.id,
        &CreateCustomer {
            name: "Jane Doe".to_string(),
            email: None,
            phone: None,
            address: None,
            latitude: None,
            longitude: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    let job = JobRepo::create(
        pool,
        organization.id,
        owner.id,
        &CreateJob {
            customer_id: customer.id,
            technician_id: None,
            title: "Inspect furnace".to_string(),
            description: None,
            scheduled_at: Utc::now(),
            duration_minutes: None,
            price: None,
            metadata: None,
        },
    )
    .await
    .unwrap();

    let scope = TenantScope {
        organization_id: organization.id,
        actor_id: owner.id,
        role: "owner".to_string(),
        kind: ActorKind::User,
    };
    (scope, job.id)
}

fn service(pool: &PgPool) -> (AttachmentService, Arc<MemoryObjectStore>) {
    let store = Arc::new(MemoryObjectStore::new("test-bucket"));
    let svc = AttachmentService::new(pool.clone(), store.clone(), Duration::from_secs(5));
    (svc, store)
}

fn photo(job_id: DbId, name: &str) -> UploadRequest {
    UploadRequest {
        job_id,
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
        mime_type: "image/png".to_string(),
        original_file_name: name.to_string(),
        category: Some("before".to_string()),
        description: None,
    }
}

fn pdf(job_id: DbId) -> UploadRequest {
    UploadRequest {
        job_id,
        bytes: b"%PDF-1.7".to_vec(),
        mime_type: "application/pdf".to_string(),
        original_file_name: "invoice.pdf".to_string(),
        category: None,
        description: Some("Signed invoice".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_stores_object_and_row(pool: PgPool) {
    let (scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    let (svc, store) = service(&pool);

    let uploaded = svc.upload(&scope, photo(job_id, "../../unit.PNG")).await.unwrap();
    let file = &uploaded.file;

    assert_eq!(file.file_type, "photo");
    assert_eq!(file.file_name, "unit.PNG");
    assert_eq!(file.file_extension, "png");
    assert_eq!(file.original_file_name, "../../unit.PNG");
    assert_eq!(file.file_size, 4);
    assert_eq!(file.uploaded_by_user, Some(scope.actor_id));
    assert_eq!(file.uploaded_by_worker, None);
    assert_eq!(file.storage_bucket, "test-bucket");
    let prefix = format!("organizations/{}/jobs/{job_id}/photo/", scope.organization_id);
    assert!(file.storage_key.starts_with(&prefix), "unexpected key {}", file.storage_key);
    assert!(file.storage_key.ends_with("_unit.PNG"));
    assert!(uploaded.url.is_some());

    assert!(store.exists(&file.storage_key).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_name_uploads_keep_separate_objects(pool: PgPool) {
    let (scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    let (svc, store) = service(&pool);

    let first = svc.upload(&scope, photo(job_id, "unit.png")).await.unwrap();
    let second = svc.upload(&scope, photo(job_id, "unit.png")).await.unwrap();

    assert_ne!(first.file.storage_key, second.file.storage_key);
    assert_eq!(store.len().await, 2);
    assert!(store.exists(&first.file.storage_key).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_worker_upload_records_worker_column(pool: PgPool) {
    let (mut scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    scope.kind = ActorKind::Worker;
    scope.actor_id = 77;
    scope.role = "worker".to_string();
    let (svc, _store) = service(&pool);

    let uploaded = svc.upload(&scope, pdf(job_id)).await.unwrap();
    assert_eq!(uploaded.file.uploaded_by_user, None);
    assert_eq!(uploaded.file.uploaded_by_worker, Some(77));
    assert_eq!(uploaded.file.file_type, "document");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unsupported_mime_is_rejected_before_storing(pool: PgPool) {
    let (scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    let (svc, store) = service(&pool);

    let mut request = pdf(job_id);
    request.mime_type = "text/plain".to_string();

    assert_matches!(
        svc.upload(&scope, request).await,
        Err(CoreError::UnsupportedMediaType(_))
    );
    assert!(store.is_empty().await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_to_foreign_job_is_not_found(pool: PgPool) {
    let (_scope_a, job_a) = tenant_with_job(&pool, "a@acme.test").await;
    let (scope_b, _job_b) = tenant_with_job(&pool, "b@bolt.test").await;
    let (svc, store) = service(&pool);

    assert_matches!(
        svc.upload(&scope_b, photo(job_a, "x.png")).await,
        Err(CoreError::NotFound { entity: "Job", .. })
    );
    assert!(store.is_empty().await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_metadata_insert_removes_object(pool: PgPool) {
    let (scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    let (svc, store) = service(&pool);

    sqlx::query("DROP TABLE project_files").execute(&pool).await.unwrap();

    assert_matches!(
        svc.upload(&scope, photo(job_id, "unit.png")).await,
        Err(CoreError::Internal(_))
    );
    assert!(store.is_empty().await, "object must not survive a failed insert");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_compensation_is_recorded(pool: PgPool) {
    let (scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    let (svc, store) = service(&pool);

    sqlx::query("DROP TABLE project_files").execute(&pool).await.unwrap();
    store.set_fail_deletes(true);

    assert_matches!(
        svc.upload(&scope, photo(job_id, "unit.png")).await,
        Err(CoreError::Internal(_))
    );
    assert_eq!(store.len().await, 1);

    let orphans = StorageOrphanRepo::list_unresolved(&pool, scope.organization_id)
        .await
        .unwrap();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].reason, "compensating_delete_failed");
    assert_eq!(orphans[0].job_id, Some(job_id));
    assert!(store.exists(&orphans[0].storage_key).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_timed_out_put_removes_late_object(pool: PgPool) {
    let (scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    let store = Arc::new(MemoryObjectStore::new("test-bucket"));
    let svc = AttachmentService::new(pool.clone(), store.clone(), Duration::from_millis(200));
    store.set_put_delay(Duration::from_secs(2));

    assert_matches!(
        svc.upload(&scope, photo(job_id, "unit.png")).await,
        Err(CoreError::Internal(_))
    );
    assert!(store.is_empty().await, "late object must be removed");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM project_files")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
    let orphans = StorageOrphanRepo::list_unresolved(&pool, scope.organization_id)
        .await
        .unwrap();
    assert!(orphans.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_timed_out_put_with_failed_cleanup_is_recorded(pool: PgPool) {
    let (scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    let store = Arc::new(MemoryObjectStore::new("test-bucket"));
    let svc = AttachmentService::new(pool.clone(), store.clone(), Duration::from_millis(200));
    store.set_put_delay(Duration::from_secs(2));
    store.set_fail_deletes(true);

    assert_matches!(
        svc.upload(&scope, photo(job_id, "unit.png")).await,
        Err(CoreError::Internal(_))
    );
    assert_eq!(store.len().await, 1);

    let orphans = StorageOrphanRepo::list_unresolved(&pool, scope.organization_id)
        .await
        .unwrap();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].reason, "compensating_delete_failed");
    assert!(store.exists(&orphans[0].storage_key).await.unwrap());
}

// ---------------------------------------------------------------------------
// List / get
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_type(pool: PgPool) {
    let (scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    let (svc, _store) = service(&pool);

    svc.upload(&scope, photo(job_id, "one.png")).await.unwrap();
    svc.upload(&scope, pdf(job_id)).await.unwrap();

    assert_eq!(svc.list(&scope, job_id, None).await.unwrap().len(), 2);

    let photos = svc.list(&scope, job_id, Some("photo")).await.unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].file.file_type, "photo");

    assert!(svc.list(&scope, job_id, Some("video")).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signing_failure_nulls_url_in_list_but_fails_get(pool: PgPool) {
    let (scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    let (svc, store) = service(&pool);

    let uploaded = svc.upload(&scope, photo(job_id, "one.png")).await.unwrap();
    store.set_fail_signing(true);

    let listed = svc.list(&scope, job_id, None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].url.is_none());

    assert_matches!(
        svc.get(&scope, uploaded.file.id).await,
        Err(CoreError::Internal(_))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_distinguishes_missing_from_foreign(pool: PgPool) {
    let (scope_a, job_a) = tenant_with_job(&pool, "a@acme.test").await;
    let (scope_b, _job_b) = tenant_with_job(&pool, "b@bolt.test").await;
    let (svc, _store) = service(&pool);

    let uploaded = svc.upload(&scope_a, photo(job_a, "one.png")).await.unwrap();

    let got = svc.get(&scope_a, uploaded.file.id).await.unwrap();
    assert!(got.url.is_some());

    assert_matches!(
        svc.get(&scope_b, uploaded.file.id).await,
        Err(CoreError::Forbidden(_))
    );
    assert_matches!(
        svc.get(&scope_a, uploaded.file.id + 1000).await,
        Err(CoreError::NotFound { entity: "File", .. })
    );
    assert_matches!(
        svc.list(&scope_b, job_a, None).await,
        Err(CoreError::NotFound { entity: "Job", .. })
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_object_and_row(pool: PgPool) {
    let (scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    let (svc, store) = service(&pool);

    let uploaded = svc.upload(&scope, pdf(job_id)).await.unwrap();
    svc.delete(&scope, uploaded.file.id).await.unwrap();

    assert!(!store.exists(&uploaded.file.storage_key).await.unwrap());
    assert_matches!(
        svc.get(&scope, uploaded.file.id).await,
        Err(CoreError::NotFound { .. })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_object_delete_keeps_row(pool: PgPool) {
    let (scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    let (svc, store) = service(&pool);

    let uploaded = svc.upload(&scope, pdf(job_id)).await.unwrap();
    store.set_fail_deletes(true);

    assert_matches!(
        svc.delete(&scope, uploaded.file.id).await,
        Err(CoreError::Internal(_))
    );
    assert!(svc.get(&scope, uploaded.file.id).await.is_ok());
    assert!(store.exists(&uploaded.file.storage_key).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_row_delete_is_recorded(pool: PgPool) {
    let (scope, job_id) = tenant_with_job(&pool, "a@acme.test").await;
    let (svc, store) = service(&pool);

    let uploaded = svc.upload(&scope, pdf(job_id)).await.unwrap();

    sqlx::query(
        "CREATE FUNCTION reject_delete() RETURNS TRIGGER AS $$ \
         BEGIN RAISE EXCEPTION 'deletes are disabled'; END; \
         $$ LANGUAGE plpgsql",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER trg_reject_delete BEFORE DELETE ON project_files \
         FOR EACH ROW EXECUTE FUNCTION reject_delete()",
    )
    .execute(&pool)
    .await
    .unwrap();

    assert_matches!(
        svc.delete(&scope, uploaded.file.id).await,
        Err(CoreError::Internal(_))
    );
    assert!(!store.exists(&uploaded.file.storage_key).await.unwrap());

    let orphans = StorageOrphanRepo::list_unresolved(&pool, scope.organization_id)
        .await
        .unwrap();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].reason, "metadata_delete_failed");
    assert_eq!(orphans[0].file_id, Some(uploaded.file.id));
}

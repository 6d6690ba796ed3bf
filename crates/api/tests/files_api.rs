//! HTTP-level tests for job attachments over the memory object store.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_auth, post_json_auth, post_multipart, upload_file,
    MULTIPART_BOUNDARY, TEST_BUCKET,
};
use routewise_storage::MemoryObjectStore;
use serde_json::json;
use sqlx::PgPool;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_list_get_delete(pool: PgPool) {
    let store = Arc::new(MemoryObjectStore::new(TEST_BUCKET));
    let app = common::build_test_app_with_store(pool, store.clone());
    let token = common::register(app.clone(), "Acme HVAC", "owner@acme.com").await;
    let customer_id = common::create_customer(app.clone(), &token, "Jane Doe").await;
    let job_id = common::create_job(app.clone(), &token, customer_id, "Photo job").await;
    let files_uri = format!("/api/v1/jobs/{job_id}/files");

    let response = upload_file(
        app.clone(),
        &files_uri,
        &token,
        "../../etc/unit.png",
        "image/png",
        PNG_BYTES,
        Some("before"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let photo = body_json(response).await["data"].clone();
    let file_id = photo["id"].as_i64().unwrap();
    assert_eq!(photo["file_type"], "photo");
    assert_eq!(photo["file_category"], "before");
    assert_eq!(photo["original_file_name"], "../../etc/unit.png");
    assert_eq!(photo["file_size"], PNG_BYTES.len());
    assert_eq!(photo["storage_bucket"], TEST_BUCKET);
    assert!(photo["uploaded_by_user"].is_number());
    assert!(photo.get("uploaded_by_worker").is_none());

    let key = photo["storage_key"].as_str().unwrap().to_string();
    assert!(key.starts_with("organizations/"));
    assert!(key.contains(&format!("/jobs/{job_id}/photo/")));
    assert!(key.ends_with("_unit.png"), "directory components are stripped: {key}");
    let (stored, content_type) = store.get(&key).await.expect("object should be stored");
    assert_eq!(stored, PNG_BYTES);
    assert_eq!(content_type, "image/png");

    let response = upload_file(
        app.clone(),
        &files_uri,
        &token,
        "invoice.pdf",
        "application/pdf",
        b"%PDF-1.4",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let all = body_json(get_auth(app.clone(), &files_uri, &token).await).await;
    let all = all["data"].as_array().unwrap().clone();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["file_type"], "document", "newest first");
    assert!(all.iter().all(|f| f["url"].is_string()));

    let photos = body_json(get_auth(app.clone(), &format!("{files_uri}?type=photo"), &token).await).await;
    assert_eq!(photos["data"].as_array().unwrap().len(), 1);
    let videos = body_json(get_auth(app.clone(), &format!("{files_uri}?type=video"), &token).await).await;
    assert_eq!(videos["data"], json!([]));

    let fetched = body_json(get_auth(app.clone(), &format!("/api/v1/files/{file_id}"), &token).await).await;
    let url = fetched["data"]["url"].as_str().unwrap();
    assert!(url.starts_with(&format!("memory://{TEST_BUCKET}/{key}")));

    let response = delete_auth(app.clone(), &format!("/api/v1/files/{file_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(store.get(&key).await.is_none(), "object is removed with the row");

    let response = get_auth(app, &format!("/api/v1/files/{file_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unsupported_and_missing_files_are_rejected(pool: PgPool) {
    let store = Arc::new(MemoryObjectStore::new(TEST_BUCKET));
    let app = common::build_test_app_with_store(pool, store.clone());
    let token = common::register(app.clone(), "Acme HVAC", "owner@acme.com").await;
    let customer_id = common::create_customer(app.clone(), &token, "Jane Doe").await;
    let job_id = common::create_job(app.clone(), &token, customer_id, "Docs").await;
    let files_uri = format!("/api/v1/jobs/{job_id}/files");

    let response = upload_file(app.clone(), &files_uri, &token, "notes.txt", "text/plain", b"hi", None).await;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body_json(response).await["code"], "UNSUPPORTED_MEDIA_TYPE");
    assert!(store.is_empty().await, "nothing is written for a rejected type");

    let response = post_auth(app.clone(), &files_uri, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = upload_file(
        app,
        &format!("/api/v1/jobs/{}/files", job_id + 1000),
        &token,
        "unit.png",
        "image/png",
        PNG_BYTES,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_truncated_text_field_is_rejected(pool: PgPool) {
    let store = Arc::new(MemoryObjectStore::new(TEST_BUCKET));
    let app = common::build_test_app_with_store(pool, store.clone());
    let token = common::register(app.clone(), "Acme HVAC", "owner@acme.com").await;
    let customer_id = common::create_customer(app.clone(), &token, "Jane Doe").await;
    let job_id = common::create_job(app.clone(), &token, customer_id, "Docs").await;

    // The body ends inside the description part, before any closing boundary.
    let body = format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"description\"\r\n\r\n\
         Replaced the blower"
    )
    .into_bytes();

    let response = post_multipart(app, &format!("/api/v1/jobs/{job_id}/files"), &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(
        json["error"].as_str().unwrap().contains("'description'"),
        "unexpected error: {json}",
    );
    assert!(store.is_empty().await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_file_by_id_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool);
    let acme = common::register(app.clone(), "Acme HVAC", "owner@acme.com").await;
    let rival = common::register(app.clone(), "Rival Plumbing", "owner@rival.com").await;
    let customer_id = common::create_customer(app.clone(), &acme, "Jane Doe").await;
    let job_id = common::create_job(app.clone(), &acme, customer_id, "Private").await;

    let response = upload_file(
        app.clone(),
        &format!("/api/v1/jobs/{job_id}/files"),
        &acme,
        "unit.png",
        "image/png",
        PNG_BYTES,
        None,
    )
    .await;
    let file_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), &format!("/api/v1/files/{file_id}"), &rival).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &format!("/api/v1/files/{file_id}"), &rival).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, &format!("/api/v1/files/{}", file_id + 1000), &rival).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_worker_uploads_record_the_worker(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = common::register(app.clone(), "Acme HVAC", "owner@acme.com").await;
    let customer_id = common::create_customer(app.clone(), &owner, "Jane Doe").await;
    let job_id = common::create_job(app.clone(), &owner, customer_id, "Field photos").await;

    let worker = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/workers",
            json!({ "name": "Wendy Worker", "phone": "555-0300" }),
            &owner,
        )
        .await,
    )
    .await;
    let worker_id = worker["data"]["id"].as_i64().unwrap();
    let token = body_json(post_auth(app.clone(), &format!("/api/v1/workers/{worker_id}/token"), &owner).await)
        .await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = upload_file(
        app,
        &format!("/api/v1/jobs/{job_id}/files"),
        &token,
        "after.jpg",
        "image/jpeg",
        b"jpeg-bytes",
        Some("after"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let file = body_json(response).await["data"].clone();
    assert_eq!(file["uploaded_by_worker"], worker_id);
    assert!(file.get("uploaded_by_user").is_none());
}

//! Object storage for job attachments.
//!
//! [`ObjectStore`] abstracts the blob backend (S3 in production, an
//! in-memory map for tests and local development). [`AttachmentService`]
//! keeps the store and the `project_files` table in step.

pub mod attachments;
pub mod error;
pub mod memory;
pub mod s3;
pub mod store;

pub use attachments::{AttachmentService, UploadRequest};
pub use error::StorageError;
pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;
pub use store::ObjectStore;

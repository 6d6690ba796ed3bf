//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Every tenant-owned query takes
//! the organization id and filters by it in SQL, so a row belonging to
//! another organization behaves exactly like a missing row.

pub mod customer_repo;
pub mod job_note_repo;
pub mod job_part_repo;
pub mod job_photo_repo;
pub mod job_repo;
pub mod organization_repo;
pub mod project_file_repo;
pub mod storage_orphan_repo;
pub mod technician_repo;
pub mod user_repo;
pub mod worker_repo;

pub use customer_repo::CustomerRepo;
pub use job_note_repo::JobNoteRepo;
pub use job_part_repo::JobPartRepo;
pub use job_photo_repo::JobPhotoRepo;
pub use job_repo::JobRepo;
pub use organization_repo::OrganizationRepo;
pub use project_file_repo::ProjectFileRepo;
pub use storage_orphan_repo::StorageOrphanRepo;
pub use technician_repo::TechnicianRepo;
pub use user_repo::UserRepo;
pub use worker_repo::WorkerRepo;

/// Escape `ILIKE` wildcards in user input and wrap it for substring match.
pub(crate) fn ilike_contains(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

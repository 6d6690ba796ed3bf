//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod customer;
pub mod job;
pub mod job_collection;
pub mod organization;
pub mod project_file;
pub mod storage_orphan;
pub mod technician;
pub mod worker;

use serde::{Deserialize, Deserializer};

/// Deserialize a field so that "absent" and "explicit null" differ.
///
/// Use with `#[serde(default, deserialize_with = "explicit_null")]` on an
/// `Option<Option<T>>`: absent is `None`, `null` is `Some(None)`.
pub(crate) fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

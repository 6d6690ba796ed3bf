//! Tenant scoping primitives.
//!
//! Every tenant-facing operation takes a [`TenantScope`]. It is produced
//! only from a verified identity assertion and carries the organization
//! that all queries must be filtered by.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// The kind of authenticated actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    /// An organization user (owner, admin, dispatcher).
    User,
    /// A field worker.
    Worker,
}

impl ActorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Worker => "worker",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "user" => Ok(Self::User),
            "worker" => Ok(Self::Worker),
            other => Err(CoreError::Validation(format!(
                "Unknown actor kind '{other}'"
            ))),
        }
    }
}

/// Caller identity resolved by the tenancy guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantScope {
    pub organization_id: DbId,
    pub actor_id: DbId,
    pub role: String,
    pub kind: ActorKind,
}

impl TenantScope {
    /// Split the actor id into `(uploaded_by_user, uploaded_by_worker)`.
    ///
    /// Exactly one side is `Some`.
    pub fn uploader_columns(&self) -> (Option<DbId>, Option<DbId>) {
        match self.kind {
            ActorKind::User => (Some(self.actor_id), None),
            ActorKind::Worker => (None, Some(self.actor_id)),
        }
    }

    pub fn is_worker(&self) -> bool {
        self.kind == ActorKind::Worker
    }
}

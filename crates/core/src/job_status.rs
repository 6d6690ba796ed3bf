//! Job status state machine and listing order.
//!
//! Any status may move to any other status. The only rule the engine
//! enforces is the completion stamp: entering `completed` from another
//! status sets `completed_at`, and nothing ever clears it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default visit length applied when a job is created without one.
pub const DEFAULT_DURATION_MINUTES: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

const VALID_STATUSES: &[&str] = &["scheduled", "in_progress", "completed", "cancelled"];

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a status name, failing with a validation error on anything
    /// outside the four known values.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: {VALID_STATUSES:?}"
            ))),
        }
    }
}

/// Listing order for jobs (`?sort=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSort {
    /// `created_at DESC`.
    #[default]
    CreatedAtDesc,
    /// `scheduled_at ASC`.
    ScheduledAt,
    /// `status ASC, scheduled_at ASC`.
    StatusThenScheduledAt,
}

impl JobSort {
    /// Unknown or missing values fall back to the default order.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("scheduled_at") => Self::ScheduledAt,
            Some("status") => Self::StatusThenScheduledAt,
            _ => Self::CreatedAtDesc,
        }
    }

    pub fn order_by(self) -> &'static str {
        match self {
            Self::CreatedAtDesc => "created_at DESC, id DESC",
            Self::ScheduledAt => "scheduled_at ASC, id ASC",
            Self::StatusThenScheduledAt => "status ASC, scheduled_at ASC, id ASC",
        }
    }
}

/// Apply the creation default for `duration_minutes`.
pub fn effective_duration(requested: Option<i32>) -> i32 {
    match requested {
        Some(minutes) if minutes > 0 => minutes,
        _ => DEFAULT_DURATION_MINUTES,
    }
}

//! Domain rules for RouteWise that do not touch I/O.

pub mod attachments;
pub mod error;
pub mod job_status;
pub mod roles;
pub mod tenancy;
pub mod types;
pub mod validation;

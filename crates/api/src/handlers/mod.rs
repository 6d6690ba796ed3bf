pub mod admin;
pub mod auth;
pub mod customers;
pub mod files;
pub mod job_collections;
pub mod jobs;
pub mod technicians;
pub mod workers;

/// Reelay client library.
///
/// Owns the single-task workflow against the reupload backend: source-URL
/// validation, job submission, status polling, result rendering, and reset.
pub mod api;
pub mod config;
pub mod controller;
pub mod render;
pub mod validate;
pub mod view;

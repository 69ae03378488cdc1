/// Shared wire models and error types for the Reelay client.
pub mod errors;
pub mod models;

pub use errors::{ReelayError, ReelayResult, TransportError, ValidationError};

//! Layered error types for the registry ACL client.
//!
//! The hierarchy mirrors the call lifecycle:
//! - [`ApiError`] - Top-level error type returned by client calls
//! - [`SchemaError`] - Operations schema loading and validation errors
//! - [`DistillError`] - Argument resolution errors, raised before any I/O
//! - [`TransportError`] - HTTP transport failures
//! - [`ExecuteError`] - Status-derived failures from the executor
//! - [`CacheError`] - Cache store failures

mod api_error;
mod cache_error;
mod distill_error;
mod execute_error;
mod schema_error;
mod transport_error;

pub use api_error::ApiError;
pub use cache_error::CacheError;
pub use distill_error::DistillError;
pub use execute_error::ExecuteError;
pub use schema_error::SchemaError;
pub use transport_error::TransportError;

use thiserror::Error;

use super::{CacheError, DistillError, ExecuteError, SchemaError, TransportError};

/// Top-level error type for all client operations.
///
/// Argument-shape problems ([`DistillError`]) are raised before any I/O
/// occurs. Transport and status errors propagate through the call's result;
/// nothing is retried internally.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The operations schema failed to load or validate.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Call arguments could not be resolved into a request.
    #[error(transparent)]
    Distill(#[from] DistillError),

    /// The HTTP transport failed (network, DNS, TLS).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a status the executor treats as failure.
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    /// The cache store failed during an explicit invalidation.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// No operation with the given dotted name exists in the schema.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// A cache operation was requested but no cache store is configured.
    #[error("no cache store configured")]
    CacheNotConfigured,
}

impl ApiError {
    /// Returns the HTTP status code for status-derived errors, so callers
    /// can branch on it (e.g. treat a 402 specially upstream).
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Execute(err) => Some(err.status_code()),
            _ => None,
        }
    }
}

use thiserror::Error;

/// Cache store failures.
///
/// Reads and best-effort population treat these as soft failures (logged,
/// then served from the network); explicit invalidation surfaces them.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The underlying key-value store reported an error.
    #[error("cache store error: {0}")]
    Store(String),
}

use thiserror::Error;

/// HTTP transport failures, propagated unchanged to the caller.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying HTTP client failed (connect, DNS, TLS, decode).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
}

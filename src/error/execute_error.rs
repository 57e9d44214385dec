use thiserror::Error;

/// Status-derived failures from the executor.
///
/// The two variants reflect the executor's asymmetric status handling: a
/// cache-eligible read must be a clean 200 before its payload may be
/// cached, while the uncached path treats 404 as a legitimate
/// application-level result and only fails on other 400+ statuses.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// A cache-eligible GET fell through to the network and got a non-200.
    #[error("unexpected status code {status}")]
    UnexpectedStatus { status: u16 },

    /// An uncached call got a status above 399 other than 404.
    #[error("Error {status}: {body}")]
    RequestFailed { status: u16, body: String },
}

impl ExecuteError {
    /// Returns the HTTP status code carried by this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UnexpectedStatus { status } => *status,
            Self::RequestFailed { status, .. } => *status,
        }
    }
}

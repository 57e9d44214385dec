use thiserror::Error;

/// Errors raised while resolving call arguments into a request.
///
/// These are synchronous failures: a distill error means no request was
/// constructed and no I/O was attempted.
#[derive(Debug, Error)]
pub enum DistillError {
    /// Path placeholders were left unfilled after positional substitution.
    /// `missing` lists the parameter names, comma-joined, in declaration
    /// order.
    #[error("call to {operation} missing required arguments: {missing}")]
    MissingArguments { operation: String, missing: String },

    /// A ttl string could not be parsed as a duration.
    #[error("invalid ttl {value:?}: {reason}")]
    InvalidTtl { value: String, reason: String },

    /// The resolved protocol/host pair does not form a valid URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An options argument appeared somewhere other than the final position.
    #[error("call to {operation} has an options argument in a non-final position")]
    MisplacedOptions { operation: String },
}

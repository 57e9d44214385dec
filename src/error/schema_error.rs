use thiserror::Error;

/// Errors raised while loading or validating an operations schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The YAML document could not be parsed.
    #[error("failed to parse operations schema: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two operations share the same dotted name.
    #[error("duplicate operation name: {0}")]
    DuplicateOperation(String),

    /// A path template repeats a placeholder name.
    #[error("operation {operation} repeats path parameter {{{param}}}")]
    DuplicatePathParam { operation: String, param: String },

    /// The declared method is not one of GET/POST/PUT/DELETE.
    #[error("operation {operation} declares invalid method {method:?}")]
    InvalidMethod { operation: String, method: String },
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed input at {field}: {reason}")]
    MalformedInput { field: String, reason: String },

    #[error("Aggregation precondition failed: {0}")]
    AggregationPrecondition(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Setup errors abort before any analysis runs; everything else is per-request.
    pub fn is_fatal_setup(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

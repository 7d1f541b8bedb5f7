use thiserror::Error;

/// Errors raised while preparing the normalizer. None of them reach the host
/// page: call sites log and fall back.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid selector pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid normalizer configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

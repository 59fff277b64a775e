use thiserror::Error;

/// Construction-time failures. Runtime stepping is infallible by design:
/// numeric degeneracies are handled as controller branches, not errors.
#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing target")]
    MissingTarget,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;

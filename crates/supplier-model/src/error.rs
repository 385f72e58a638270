use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid threshold '{0}': expected a number between 0 and 100")]
    InvalidThreshold(String),
    #[error("unknown scorer '{0}': expected 'token-set' or 'token-sort'")]
    UnknownScorer(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WesichainError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Retrieval failed: {0}")]
    Retrieval(String),
}

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("key not found")]
    NotFound,
    #[error("engine closed")]
    Closed,
    #[error("read-only transaction")]
    ReadOnly,
    #[error("{0}")]
    Failure(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

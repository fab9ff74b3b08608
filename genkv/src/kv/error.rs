use crate::storage::error::EngineError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KvError {
    #[error("not found")]
    NotFound,
    #[error("old generation")]
    OldGeneration,
    #[error("generation overflow")]
    GenerationOverflow,
    #[error(transparent)]
    Engine(EngineError),
    #[error("corrupted record: {0}")]
    Corrupted(String),
}

impl From<EngineError> for KvError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound => KvError::NotFound,
            err => KvError::Engine(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, KvError>;

use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

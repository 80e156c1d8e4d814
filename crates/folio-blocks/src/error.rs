use folio_types::{BlockTag, TypeError};

/// Errors from block construction and editing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    /// Variant options failed validation (e.g. an empty code language).
    #[error("{0}")]
    Validation(String),

    /// An editor was invoked for a block of a different variant.
    #[error("Block is not {} {expected} block", .expected.article())]
    TypeMismatch { expected: BlockTag, actual: BlockTag },

    /// The requested tag names no known block variant.
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),
}

impl From<TypeError> for BlockError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::UnknownBlockType(tag) => Self::UnknownBlockType(tag),
            other => Self::Validation(other.to_string()),
        }
    }
}

/// Result alias for block operations.
pub type BlockResult<T> = Result<T, BlockError>;

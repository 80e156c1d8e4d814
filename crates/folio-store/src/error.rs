use std::path::PathBuf;

use folio_types::{BlockId, Direction, PostId};

use crate::revision::Revision;

/// Errors from collection persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The collection changed since it was loaded.
    #[error("revision conflict: expected {expected}, found {actual}")]
    RevisionConflict { expected: Revision, actual: Revision },

    /// The stored collection cannot be parsed, so writing would replace it
    /// with whatever the caller patched onto an empty one.
    #[error("refusing to overwrite unreadable collection at {}", .0.display())]
    Degraded(PathBuf),

    /// The changes were made on top of a snapshot that failed to load.
    #[error("refusing to save changes made to a collection that failed to load")]
    DegradedSnapshot,

    /// Storage backend is read-only or otherwise unavailable.
    #[error("store is read-only")]
    ReadOnly,
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from positional operations on a post's block sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Content block not found: {0}")]
    BlockNotFound(BlockId),

    #[error("Target content block not found: {0}")]
    TargetNotFound(BlockId),

    #[error("index {index} out of bounds for {len} blocks")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Cannot move block {block} {direction}")]
    OutOfRange { block: BlockId, direction: Direction },

    #[error("duplicate block id: {0}")]
    DuplicateBlock(BlockId),
}

/// Result alias for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

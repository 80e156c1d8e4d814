use async_trait::async_trait;
use folio_types::Post;

use crate::error::StoreResult;
use crate::revision::Revision;

/// A loaded collection together with the revision it was read at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub posts: Vec<Post>,
    pub revision: Revision,
    /// The collection could not be read and `posts` is a stand-in. Changes
    /// made on top of a degraded snapshot must never be saved.
    pub degraded: bool,
}

impl Snapshot {
    pub fn new(posts: Vec<Post>, revision: Revision) -> Self {
        Self {
            posts,
            revision,
            degraded: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Revision::empty())
    }

    /// Empty stand-in for a collection that failed to load.
    pub fn degraded() -> Self {
        Self {
            degraded: true,
            ..Self::empty()
        }
    }
}

/// Whole-collection persistence for posts.
///
/// All implementations must satisfy these invariants:
/// - `load_all` never fails. A missing collection is empty; an unreadable
///   one is logged and reported as a [`Snapshot::degraded`] snapshot.
/// - Callers must not pass changes derived from a degraded snapshot to
///   `save_all`, whatever later loads return.
/// - `save_all` replaces the entire collection. Failures are logged and
///   returned, never retried.
/// - When `expected` is given, `save_all` writes only if the stored
///   collection is still at that revision and fails with
///   `StoreError::RevisionConflict` otherwise.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Read the full collection.
    async fn load_all(&self) -> Snapshot;

    /// Replace the full collection and return its new revision.
    async fn save_all(&self, posts: &[Post], expected: Option<Revision>) -> StoreResult<Revision>;
}

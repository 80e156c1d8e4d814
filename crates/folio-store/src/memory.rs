use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use folio_types::Post;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::revision::Revision;
use crate::traits::{PostStore, Snapshot};

/// In-memory post collection.
///
/// Intended for tests and embedding. The collection is held behind a
/// `RwLock` and cloned on every load and save, matching the copy semantics
/// of a real backend. A store can be switched to read-only to simulate a
/// failing disk.
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
    read_only: AtomicBool,
}

impl InMemoryPostStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    /// Create a store seeded with `posts`.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
            read_only: AtomicBool::new(false),
        }
    }

    /// Current contents, bypassing the async interface.
    pub fn posts(&self) -> Vec<Post> {
        self.posts.read().expect("lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.posts.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.read().expect("lock poisoned").is_empty()
    }

    /// Make every subsequent save fail with [`StoreError::ReadOnly`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn load_all(&self) -> Snapshot {
        let posts = self.posts();
        match Revision::of(&posts) {
            Ok(revision) => Snapshot::new(posts, revision),
            Err(e) => {
                tracing::error!("failed to hash in-memory collection: {e}");
                Snapshot::degraded()
            }
        }
    }

    async fn save_all(&self, posts: &[Post], expected: Option<Revision>) -> StoreResult<Revision> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::ReadOnly);
        }
        let revision = Revision::of(posts)?;
        let mut current = self.posts.write().expect("lock poisoned");
        if let Some(expected) = expected {
            let actual = Revision::of(&current)?;
            if actual != expected {
                return Err(StoreError::RevisionConflict { expected, actual });
            }
        }
        *current = posts.to_vec();
        debug!(posts = posts.len(), revision = %revision, "saved in-memory collection");
        Ok(revision)
    }
}

impl std::fmt::Debug for InMemoryPostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPostStore")
            .field("post_count", &self.len())
            .finish()
    }
}

//! JSON file backend.
//!
//! The collection is a single pretty-printed JSON array of posts. Writes go
//! to a sibling temp file which is then renamed over the original, so a
//! crash mid-write leaves the previous collection intact. A file that fails
//! to parse is never overwritten: loads report it as degraded and saves
//! re-read it first.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use folio_types::Post;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::error::{StoreError, StoreResult};
use crate::revision::Revision;
use crate::traits::{PostStore, Snapshot};

/// Post collection stored as a JSON array on disk.
pub struct JsonFilePostStore {
    path: PathBuf,
    /// Serializes the revision check and the write within this process.
    write_lock: Mutex<()>,
}

impl JsonFilePostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file. `Ok(None)` means it does not exist.
    async fn read_collection(&self) -> StoreResult<Option<Vec<Post>>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let posts: Vec<Post> = serde_json::from_str(&text)?;
        Ok(Some(posts))
    }

    async fn write_collection(&self, posts: &[Post]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(posts)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PostStore for JsonFilePostStore {
    async fn load_all(&self) -> Snapshot {
        match self.read_collection().await {
            Ok(None) => {
                info!("no collection at {}, starting empty", self.path.display());
                Snapshot::empty()
            }
            Ok(Some(posts)) => match Revision::of(&posts) {
                Ok(revision) => {
                    debug!(posts = posts.len(), revision = %revision, "loaded collection");
                    Snapshot::new(posts, revision)
                }
                Err(e) => {
                    error!("failed to hash collection at {}: {e}", self.path.display());
                    Snapshot::degraded()
                }
            },
            Err(e) => {
                error!("failed to read posts from {}: {e}", self.path.display());
                Snapshot::degraded()
            }
        }
    }

    async fn save_all(&self, posts: &[Post], expected: Option<Revision>) -> StoreResult<Revision> {
        let _guard = self.write_lock.lock().await;

        let current = match self.read_collection().await {
            Ok(current) => current,
            Err(StoreError::Serialization(e)) => {
                error!("not writing posts to {}: existing file is unreadable: {e}", self.path.display());
                return Err(StoreError::Degraded(self.path.clone()));
            }
            Err(e) => return Err(e),
        };

        if let Some(expected) = expected {
            let actual = match &current {
                Some(current) => Revision::of(current)?,
                None => Revision::empty(),
            };
            if actual != expected {
                return Err(StoreError::RevisionConflict { expected, actual });
            }
        }

        let revision = Revision::of(posts)?;
        if let Err(e) = self.write_collection(posts).await {
            error!("failed to write posts to {}: {e}", self.path.display());
            return Err(e);
        }
        debug!(posts = posts.len(), revision = %revision, "saved collection");
        Ok(revision)
    }
}

impl std::fmt::Debug for JsonFilePostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFilePostStore")
            .field("path", &self.path)
            .finish()
    }
}

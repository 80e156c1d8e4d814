use std::fmt;

use folio_types::Post;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Content hash of a serialized post collection.
///
/// Two collections with the same posts in the same order share a revision,
/// regardless of which backend produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Revision([u8; 32]);

impl Revision {
    /// Compute the revision of a collection.
    pub fn of(posts: &[Post]) -> StoreResult<Self> {
        let bytes = serde_json::to_vec(posts)?;
        Ok(Self::from_bytes(&bytes))
    }

    fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"folio-collection-v1:");
        hasher.update(data);
        Self(*hasher.finalize().as_bytes())
    }

    /// Revision of the empty collection.
    pub fn empty() -> Self {
        Self::from_bytes(b"[]")
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Revision({})", self.short_id())
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_id())
    }
}

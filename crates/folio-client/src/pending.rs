//! Client-side buffer of unsaved block changes.
//!
//! Changes are keyed by block id, so a block has at most one pending change
//! and the latest one wins: editing a block staged for deletion turns it back
//! into an edit, deleting an edited block drops the edit. Committing sends
//! all edits concurrently, then all deletes, and clears the buffer only if
//! every request succeeded.

use std::collections::BTreeMap;

use folio_blocks::{decode, encode};
use folio_types::{BlockId, BlockTag, ContentBlock, Post, PostId};
use futures::future::join_all;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::ContentApi;
use crate::error::{ClientError, ClientResult, CommitFailure, FailedChange};

/// Pragma options as staged; `None` values are not sent.
pub type EditOptions = BTreeMap<String, Option<String>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingChange {
    Edit {
        /// Variant of the edited block, when the editor knows it.
        tag: Option<BlockTag>,
        /// Body text without pragma lines.
        content: String,
        /// Text the editor started from.
        original_content: String,
        options: EditOptions,
    },
    Delete,
}

impl PendingChange {
    /// Raw text sent to the server for an edit: options re-encoded as pragma
    /// lines in front of the body.
    pub fn raw_content(&self) -> Option<String> {
        match self {
            Self::Edit {
                content, options, ..
            } => Some(encode(options, content)),
            Self::Delete => None,
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete)
    }
}

pub type PendingMap = BTreeMap<BlockId, PendingChange>;

/// What a successful commit did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitOutcome {
    pub updated: Vec<ContentBlock>,
    pub deleted: Vec<BlockId>,
    /// The post as re-read after the commit. `None` for an empty commit or
    /// when the reload failed.
    pub post: Option<Post>,
}

impl CommitOutcome {
    pub fn is_noop(&self) -> bool {
        self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// Observable map of pending changes.
pub struct PendingChanges {
    changes: watch::Sender<PendingMap>,
}

impl PendingChanges {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(PendingMap::new());
        Self { changes }
    }

    /// Stage an edit whose content is sent as is.
    pub fn stage_edit(
        &self,
        block_id: BlockId,
        content: impl Into<String>,
        original_content: impl Into<String>,
    ) {
        self.insert(
            block_id,
            PendingChange::Edit {
                tag: None,
                content: content.into(),
                original_content: original_content.into(),
                options: EditOptions::new(),
            },
        );
    }

    /// Stage an edit from an already split body and options.
    pub fn stage_edit_with(
        &self,
        block_id: BlockId,
        tag: BlockTag,
        content: impl Into<String>,
        original_content: impl Into<String>,
        options: EditOptions,
    ) {
        self.insert(
            block_id,
            PendingChange::Edit {
                tag: Some(tag),
                content: content.into(),
                original_content: original_content.into(),
                options,
            },
        );
    }

    /// Stage an edit from raw editor text.
    ///
    /// Code blocks keep their `language` pragma (or `None` when absent, so
    /// the server keeps the current language). Other variants drop all
    /// options.
    pub fn stage_raw_edit(&self, block_id: BlockId, tag: BlockTag, raw: &str, source: &str) {
        let pragma = decode(raw);
        let mut options = EditOptions::new();
        if tag == BlockTag::Code {
            options.insert(
                "language".to_string(),
                pragma.option("language").map(str::to_string),
            );
        }
        self.stage_edit_with(block_id, tag, pragma.body, source, options);
    }

    fn insert(&self, block_id: BlockId, change: PendingChange) {
        self.changes.send_modify(|map| {
            map.insert(block_id, change);
        });
    }

    pub fn stage_delete(&self, block_id: BlockId) {
        self.insert(block_id, PendingChange::Delete);
    }

    /// Drop the pending change for one block. Returns whether there was one.
    pub fn revert(&self, block_id: &BlockId) -> bool {
        self.changes.send_if_modified(|map| map.remove(block_id).is_some())
    }

    pub fn clear(&self) {
        self.changes.send_if_modified(|map| {
            let had = !map.is_empty();
            map.clear();
            had
        });
    }

    pub fn get(&self, block_id: &BlockId) -> Option<PendingChange> {
        self.changes.borrow().get(block_id).cloned()
    }

    pub fn contains(&self, block_id: &BlockId) -> bool {
        self.changes.borrow().contains_key(block_id)
    }

    pub fn len(&self) -> usize {
        self.changes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.borrow().is_empty()
    }

    pub fn snapshot(&self) -> PendingMap {
        self.changes.borrow().clone()
    }

    /// Watch the buffer; the receiver is notified on every change.
    pub fn subscribe(&self) -> watch::Receiver<PendingMap> {
        self.changes.subscribe()
    }

    /// Send every pending change for `post_id`.
    ///
    /// Edits run concurrently; deletes start only after all edits succeeded.
    /// On any failure the buffer is left as it was and the error names every
    /// failed block. On success the committed entries are removed (changes
    /// staged meanwhile stay) and the post is reloaded.
    pub async fn commit_all(&self, post_id: &PostId, api: &dyn ContentApi) -> ClientResult<CommitOutcome> {
        let staged = self.snapshot();
        if staged.is_empty() {
            return Ok(CommitOutcome::default());
        }

        let edits: Vec<(&BlockId, String)> = staged
            .iter()
            .filter_map(|(id, change)| change.raw_content().map(|raw| (id, raw)))
            .collect();
        let deletes: Vec<&BlockId> = staged
            .iter()
            .filter(|(_, change)| change.is_delete())
            .map(|(id, _)| id)
            .collect();

        let results = join_all(
            edits
                .iter()
                .map(|(id, raw)| api.update_block(post_id, id, raw)),
        )
        .await;
        let mut updated = Vec::with_capacity(edits.len());
        let mut failed = Vec::new();
        for ((id, _), result) in edits.iter().zip(results) {
            match result {
                Ok(block) => updated.push(block),
                Err(error) => failed.push(FailedChange {
                    block_id: (*id).clone(),
                    error,
                }),
            }
        }
        if !failed.is_empty() {
            warn!(post = %post_id, failed = failed.len(), "edits failed, deletes skipped");
            return Err(ClientError::Commit(CommitFailure { failed }));
        }

        let results = join_all(deletes.iter().map(|id| api.delete_block(post_id, id))).await;
        for (id, result) in deletes.iter().zip(results) {
            if let Err(error) = result {
                failed.push(FailedChange {
                    block_id: (*id).clone(),
                    error,
                });
            }
        }
        if !failed.is_empty() {
            warn!(post = %post_id, failed = failed.len(), "deletes failed");
            return Err(ClientError::Commit(CommitFailure { failed }));
        }

        self.changes.send_if_modified(|map| {
            let before = map.len();
            map.retain(|id, change| staged.get(id) != Some(&*change));
            map.len() != before
        });
        info!(
            post = %post_id,
            updated = updated.len(),
            deleted = deletes.len(),
            "committed pending changes"
        );

        let post = match api.get_post(post_id).await {
            Ok(post) => Some(post),
            Err(e) => {
                warn!(post = %post_id, "reload after commit failed: {e}");
                None
            }
        };
        Ok(CommitOutcome {
            updated,
            deleted: deletes.into_iter().cloned().collect(),
            post,
        })
    }
}

impl Default for PendingChanges {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PendingChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingChanges")
            .field("len", &self.len())
            .finish()
    }
}

//! The edit service: every post and block operation the API exposes.
//!
//! Mutations follow one transaction shape: load the full collection, patch
//! it in memory, save it back. The configured [`ConsistencyMode`] decides
//! how overlapping transactions are reconciled.

use std::collections::BTreeMap;
use std::sync::Arc;

use folio_blocks::{create_block, decode, edit_block, encode, parse_tag};
use folio_protocol::{AddBlockRequest, CreatePostRequest};
use folio_store::document::{
    delete_block_at, find_block, find_post, insert_block_relative, move_block, replace_block_at,
};
use folio_store::{DocumentError, PostStore, Snapshot, StoreError};
use folio_types::{BlockId, BlockTag, ContentBlock, Direction, Post, PostId};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::ConsistencyMode;
use crate::error::{ServerError, ServerResult};

pub struct EditService {
    store: Arc<dyn PostStore>,
    consistency: ConsistencyMode,
    write_lock: Mutex<()>,
}

impl EditService {
    pub fn new(store: Arc<dyn PostStore>, consistency: ConsistencyMode) -> Self {
        Self {
            store,
            consistency,
            write_lock: Mutex::new(()),
        }
    }

    pub fn consistency(&self) -> ConsistencyMode {
        self.consistency
    }

    /// Run one load-patch-save transaction.
    ///
    /// `apply` sees the whole collection and may change it in place. When it
    /// fails, or the collection failed to load, nothing is written.
    async fn mutate<T, F>(&self, op: &'static str, apply: F) -> ServerResult<T>
    where
        F: FnOnce(&mut Vec<Post>) -> ServerResult<T> + Send,
        T: Send,
    {
        let _guard = match self.consistency {
            ConsistencyMode::Serialized => Some(self.write_lock.lock().await),
            _ => None,
        };

        let Snapshot {
            mut posts,
            revision,
            degraded,
        } = self.store.load_all().await;
        let out = apply(&mut posts)?;
        if degraded {
            return Err(StoreError::DegradedSnapshot.into());
        }

        let expected = match self.consistency {
            ConsistencyMode::CompareAndSwap => Some(revision),
            _ => None,
        };
        let saved = self.store.save_all(&posts, expected).await?;
        debug!(op, from = %revision, to = %saved, "collection saved");
        Ok(out)
    }

    pub async fn list_posts(&self) -> Vec<Post> {
        self.store.load_all().await.posts
    }

    pub async fn get_post(&self, post_id: &PostId) -> ServerResult<Post> {
        let mut posts = self.store.load_all().await.posts;
        let index = find_post(&posts, post_id)?;
        Ok(posts.swap_remove(index))
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> ServerResult<Post> {
        self.store
            .load_all()
            .await
            .posts
            .into_iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| ServerError::NotFound(format!("Post not found: {slug}")))
    }

    /// Create an empty post. The slug is derived from the title.
    pub async fn create_post(&self, req: CreatePostRequest) -> ServerResult<Post> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(ServerError::MalformedRequest("title must not be empty".into()));
        }
        let post = Post::new(title, req.lead, req.tags);
        let created = post.clone();
        self.mutate("create_post", move |posts| {
            if posts.iter().any(|p| p.id == post.id) {
                return Err(ServerError::Internal(format!("duplicate post id {}", post.id)));
            }
            posts.push(post);
            Ok(())
        })
        .await?;
        info!(post = %created.id, slug = %created.slug, "created post");
        Ok(created)
    }

    /// Replace a block's content from raw pragma-prefixed text.
    pub async fn update_block(
        &self,
        post_id: &PostId,
        block_id: &BlockId,
        raw: &str,
    ) -> ServerResult<ContentBlock> {
        let block = self
            .mutate("update_block", |posts| {
                let pi = find_post(posts, post_id)?;
                let bi = find_block(&posts[pi], block_id)?;
                let edited = edit_block(&posts[pi].content[bi], raw)?;
                posts[pi] = replace_block_at(&posts[pi], bi, edited.clone())?;
                Ok(edited)
            })
            .await?;
        info!(post = %post_id, block = %block_id, tag = %block.tag(), "updated block");
        Ok(block)
    }

    pub async fn delete_block(&self, post_id: &PostId, block_id: &BlockId) -> ServerResult<()> {
        self.mutate("delete_block", |posts| {
            let pi = find_post(posts, post_id)?;
            let bi = find_block(&posts[pi], block_id)?;
            posts[pi] = delete_block_at(&posts[pi], bi)?;
            Ok(())
        })
        .await?;
        info!(post = %post_id, block = %block_id, "deleted block");
        Ok(())
    }

    /// Create a block and insert it relative to an optional target.
    ///
    /// The tag is parsed before the store is touched; content is validated
    /// only once the post and target are known to exist. For code blocks the
    /// request's `language` is used when the content carries no language
    /// pragma.
    pub async fn add_block(&self, post_id: &PostId, req: AddBlockRequest) -> ServerResult<ContentBlock> {
        let tag = parse_tag(&req.tag)?;
        let raw = match (&req.language, tag) {
            (Some(language), BlockTag::Code) if decode(&req.content).option("language").is_none() => {
                let options = BTreeMap::from([("language".to_string(), Some(language.clone()))]);
                encode(&options, &req.content)
            }
            _ => req.content,
        };

        let block = self
            .mutate("add_block", |posts| {
                let pi = find_post(posts, post_id)?;
                if let Some(target) = &req.target_block_id {
                    find_block(&posts[pi], target)
                        .map_err(|_| DocumentError::TargetNotFound(target.clone()))?;
                }
                let block = create_block(BlockId::generate(), tag, &raw)?;
                posts[pi] = insert_block_relative(
                    &posts[pi],
                    block.clone(),
                    req.position,
                    req.target_block_id.as_ref(),
                )?;
                Ok(block)
            })
            .await?;
        info!(post = %post_id, block = %block.id, tag = %tag, "added block");
        Ok(block)
    }

    /// Swap a block with its neighbour. Returns the moved block.
    pub async fn move_block(
        &self,
        post_id: &PostId,
        block_id: &BlockId,
        direction: Direction,
    ) -> ServerResult<ContentBlock> {
        let block = self
            .mutate("move_block", |posts| {
                let pi = find_post(posts, post_id)?;
                let bi = find_block(&posts[pi], block_id)?;
                let block = posts[pi].content[bi].clone();
                posts[pi] = move_block(&posts[pi], block_id, direction)?;
                Ok(block)
            })
            .await?;
        info!(post = %post_id, block = %block_id, %direction, "moved block");
        Ok(block)
    }
}

impl std::fmt::Debug for EditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditService")
            .field("consistency", &self.consistency)
            .finish()
    }
}

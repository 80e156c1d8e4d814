use async_trait::async_trait;
use folio_protocol::{AddBlockRequest, CreatePostRequest};
use folio_types::{BlockId, ContentBlock, Direction, Post, PostId};

use crate::error::ClientResult;

/// Remote edit API, one method per endpoint.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn list_posts(&self) -> ClientResult<Vec<Post>>;
    async fn get_post(&self, post_id: &PostId) -> ClientResult<Post>;
    async fn get_post_by_slug(&self, slug: &str) -> ClientResult<Post>;
    async fn create_post(&self, req: &CreatePostRequest) -> ClientResult<Post>;
    /// `raw` is pragma-prefixed block text.
    async fn update_block(&self, post_id: &PostId, block_id: &BlockId, raw: &str) -> ClientResult<ContentBlock>;
    async fn delete_block(&self, post_id: &PostId, block_id: &BlockId) -> ClientResult<()>;
    async fn add_block(&self, post_id: &PostId, req: &AddBlockRequest) -> ClientResult<ContentBlock>;
    async fn move_block(&self, post_id: &PostId, block_id: &BlockId, direction: Direction) -> ClientResult<ContentBlock>;
}

use folio_types::{BlockId, PostId};

/// HTTP endpoint paths (axum route syntax) and builders for concrete URLs.
pub mod endpoints {
    use super::*;

    pub const HEALTH: &str = "/health";
    pub const POSTS: &str = "/posts";
    pub const POST: &str = "/posts/:post_id";
    pub const POST_BY_SLUG: &str = "/posts/by-slug/:slug";
    pub const BLOCKS: &str = "/posts/:post_id/content";
    pub const BLOCK: &str = "/posts/:post_id/content/:block_id";
    pub const BLOCK_MOVE: &str = "/posts/:post_id/content/:block_id/move";

    /// Prefix under which the routes are mounted a second time for the
    /// web front end.
    pub const API_PREFIX: &str = "/api";

    // Builders return raw path segments. Clients must percent-encode each
    // one, since ids and slugs may contain `/`, `?` or `#`.

    pub fn posts() -> [&'static str; 1] {
        ["posts"]
    }

    pub fn post(post_id: &PostId) -> [&str; 2] {
        ["posts", post_id.as_str()]
    }

    pub fn post_by_slug(slug: &str) -> [&str; 3] {
        ["posts", "by-slug", slug]
    }

    pub fn blocks(post_id: &PostId) -> [&str; 3] {
        ["posts", post_id.as_str(), "content"]
    }

    pub fn block<'a>(post_id: &'a PostId, block_id: &'a BlockId) -> [&'a str; 4] {
        ["posts", post_id.as_str(), "content", block_id.as_str()]
    }

    pub fn block_move<'a>(post_id: &'a PostId, block_id: &'a BlockId) -> [&'a str; 5] {
        ["posts", post_id.as_str(), "content", block_id.as_str(), "move"]
    }
}

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

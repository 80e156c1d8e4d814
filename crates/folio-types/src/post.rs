use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::block::ContentBlock;
use crate::ids::{BlockId, PostId};
use crate::slug::slugify;

/// A blog post: metadata plus the ordered block sequence that forms its body.
///
/// `content` order is the rendered order. Block ids are unique within a post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub slug: String,
    pub title: String,
    /// ISO-8601 creation timestamp.
    pub date: String,
    pub lead: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Post {
    /// Create an empty post with a fresh id, a slug derived from `title` and
    /// the current UTC time as its date.
    ///
    /// Duplicate tags are dropped, keeping first occurrence order.
    pub fn new(title: impl Into<String>, lead: impl Into<String>, tags: Vec<String>) -> Self {
        let title = title.into();
        let mut unique_tags: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique_tags.contains(&tag) {
                unique_tags.push(tag);
            }
        }
        Self {
            id: PostId::generate(),
            slug: slugify(&title),
            title,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            lead: lead.into(),
            content: Vec::new(),
            tags: unique_tags,
        }
    }

    /// Look up a block by id.
    pub fn block(&self, id: &BlockId) -> Option<&ContentBlock> {
        self.content.iter().find(|b| &b.id == id)
    }

    pub fn block_ids(&self) -> Vec<BlockId> {
        self.content.iter().map(|b| b.id.clone()).collect()
    }
}

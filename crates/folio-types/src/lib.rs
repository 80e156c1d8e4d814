//! Foundation types for Folio.
//!
//! This crate provides the document model shared by the server, the store
//! and the client. Every other Folio crate depends on `folio-types`.
//!
//! # Key Types
//!
//! - [`Post`]: A blog post: metadata plus an ordered sequence of blocks
//! - [`ContentBlock`]: A single typed unit of a post's body
//! - [`BlockKind`] / [`BlockTag`]: The block variant (markdown, code, aside)
//! - [`PostId`] / [`BlockId`]: UUID v7 identifiers
//! - [`Direction`] / [`Position`]: Relative placement for move and insert

pub mod block;
pub mod error;
pub mod ids;
pub mod placement;
pub mod post;
pub mod slug;

pub use block::{BlockKind, BlockTag, ContentBlock, DEFAULT_CODE_LANGUAGE};
pub use error::TypeError;
pub use ids::{BlockId, PostId};
pub use placement::{Direction, Position};
pub use post::Post;
pub use slug::slugify;

//! Content block construction for Folio.
//!
//! A block's raw text, as typed into an editor, may start with pragma lines
//! that carry block options:
//!
//! ```text
//! #language=rust
//! fn main() {}
//! ```
//!
//! [`pragma`] splits such text into options and body (and back), and
//! [`factory`] turns raw text into validated [`ContentBlock`]s, either fresh
//! ([`create_block`]) or as an edit of an existing block ([`edit_block`]).
//!
//! # Design Rules
//!
//! 1. Decoding never fails; a malformed pragma line simply starts the body.
//! 2. A block's variant is fixed at creation. Edits go through the editor for
//!    the block's own variant; any other editor fails with `TypeMismatch`.
//! 3. Code blocks always carry a non-empty, trimmed language.
//!
//! [`ContentBlock`]: folio_types::ContentBlock

pub mod error;
pub mod factory;
pub mod pragma;

pub use error::{BlockError, BlockResult};
pub use factory::{create_block, edit_aside, edit_block, edit_code, edit_markdown, parse_tag};
pub use pragma::{decode, encode, Pragma, PragmaOptions};

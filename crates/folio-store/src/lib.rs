//! Post collection storage for Folio.
//!
//! The blog's posts live in a single collection that is always read and
//! written whole. This crate provides the two halves of that model:
//!
//! - [`document`] -- pure positional operations over a post's block
//!   sequence (find, insert-at, delete-at, replace-at, move)
//! - [`PostStore`] -- the persistence collaborator that loads and saves the
//!   full collection
//!
//! # Storage Backends
//!
//! - [`InMemoryPostStore`] -- `RwLock`-guarded `Vec` for tests and embedding
//! - [`JsonFilePostStore`] -- pretty-printed JSON array on disk
//!
//! # Design Rules
//!
//! 1. Loading never fails: a missing or unreadable collection reads as empty,
//!    and unreadable ones are logged.
//! 2. A collection that failed to parse is never overwritten.
//! 3. Saves are not retried; failures are returned to the caller.
//! 4. Every snapshot carries a [`Revision`] so callers can opt into
//!    compare-and-swap writes.

pub mod document;
pub mod error;
pub mod file;
pub mod memory;
pub mod revision;
pub mod traits;

pub use error::{DocumentError, DocumentResult, StoreError, StoreResult};
pub use file::JsonFilePostStore;
pub use memory::InMemoryPostStore;
pub use revision::Revision;
pub use traits::{PostStore, Snapshot};

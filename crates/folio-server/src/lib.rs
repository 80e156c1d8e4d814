//! HTTP server for Folio.
//!
//! Exposes the edit service over a small JSON API: posts are listed, read
//! and created; content blocks are updated, deleted, added and moved. The
//! post collection lives in a single JSON document behind a
//! [`folio_store::PostStore`].

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod service;

pub use config::{ConsistencyMode, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::FolioServer;
pub use service::EditService;

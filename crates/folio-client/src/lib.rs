//! Client for Folio.
//!
//! [`HttpContentApi`] talks to a Folio server with per-attempt timeouts and
//! bounded exponential retries. [`PendingChanges`] buffers block edits and
//! deletions made in an editor and commits them in one batch.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod pending;
pub mod retry;

pub use api::ContentApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, CommitFailure, FailedChange};
pub use http::HttpContentApi;
pub use pending::{CommitOutcome, EditOptions, PendingChange, PendingChanges, PendingMap};
pub use retry::{with_retry, RetryPolicy};

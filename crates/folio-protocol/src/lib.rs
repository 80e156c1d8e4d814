//! HTTP wire contract for Folio.
//!
//! Defines the endpoint paths and the JSON bodies exchanged between the
//! editing client and the server. Block `content` strings travel in their
//! raw form, pragma lines included.

pub mod endpoint;
pub mod message;

pub use endpoint::{endpoints, HealthResponse};
pub use message::{
    AddBlockRequest, BlockResponse, CreatePostRequest, CreatePostResponse, ErrorBody, ErrorKind,
    MoveBlockRequest, SuccessResponse, UpdateBlockRequest,
};

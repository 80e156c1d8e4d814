use std::fmt;

use folio_types::{BlockId, ContentBlock, Direction, Position, Post};
use serde::{Deserialize, Serialize};

/// Body of `POST /posts`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub lead: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub post: Post,
}

/// Body of `PUT /posts/{postId}/content/{blockId}`. `content` is raw,
/// pragma-prefixed text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBlockRequest {
    pub content: String,
}

/// Body of `POST /posts/{postId}/content`.
///
/// Without `target_block_id` the block is prepended and `position` is
/// ignored. `tag` is kept as a string so unknown variants can be reported
/// as such rather than as a shape error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBlockRequest {
    #[serde(alias = "type")]
    pub tag: String,
    pub content: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_block_id: Option<BlockId>,
    /// Fallback language for code blocks whose content has no
    /// `#language=` pragma.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Body of `PUT /posts/{postId}/content/{blockId}/move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveBlockRequest {
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockResponse {
    pub success: bool,
    pub block: ContentBlock,
}

impl BlockResponse {
    pub fn ok(block: ContentBlock) -> Self {
        Self {
            success: true,
            block,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Classification carried in every error body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    MalformedRequest,
    NotFound,
    ValidationError,
    TypeMismatch,
    UnknownBlockType,
    OutOfRange,
    RevisionConflict,
    PersistenceFailure,
    Internal,
}

impl ErrorKind {
    /// HTTP status code this kind is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedRequest
            | Self::ValidationError
            | Self::TypeMismatch
            | Self::UnknownBlockType
            | Self::OutOfRange => 400,
            Self::NotFound => 404,
            Self::RevisionConflict => 409,
            Self::PersistenceFailure | Self::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Structured error returned with every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: ErrorKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_block_accepts_original_field_names() {
        let req: AddBlockRequest = serde_json::from_value(json!({
            "type": "code",
            "content": "x",
            "language": "rust",
            "position": "before",
            "targetBlockId": "b1"
        }))
        .unwrap();
        assert_eq!(req.tag, "code");
        assert_eq!(req.position, Position::Before);
        assert_eq!(req.target_block_id, Some(BlockId::from("b1")));
        assert_eq!(req.language.as_deref(), Some("rust"));
    }

    #[test]
    fn add_block_defaults() {
        let req: AddBlockRequest =
            serde_json::from_value(json!({"tag": "markdown", "content": "x"})).unwrap();
        assert_eq!(req.position, Position::After);
        assert!(req.target_block_id.is_none());
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("targetBlockId").is_none());
    }

    #[test]
    fn move_rejects_unknown_direction() {
        let res: Result<MoveBlockRequest, _> =
            serde_json::from_value(json!({"direction": "left"}));
        assert!(res.is_err());
    }

    #[test]
    fn error_kind_status_codes() {
        assert_eq!(ErrorKind::MalformedRequest.status_code(), 400);
        assert_eq!(ErrorKind::OutOfRange.status_code(), 400);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::RevisionConflict.status_code(), 409);
        assert_eq!(ErrorKind::PersistenceFailure.status_code(), 500);
    }

    #[test]
    fn error_body_shape() {
        let body = ErrorBody {
            error: "Post not found: p".into(),
            kind: ErrorKind::NotFound,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "Post not found: p", "kind": "NotFound"})
        );
    }
}

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use folio_blocks::BlockError;
use folio_protocol::{ErrorBody, ErrorKind};
use folio_store::{DocumentError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    MalformedRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    TypeMismatch(String),

    #[error("{0}")]
    UnknownBlockType(String),

    #[error("{0}")]
    OutOfRange(String),

    #[error("{0}")]
    RevisionConflict(String),

    #[error("failed to write posts: {0}")]
    Persistence(StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedRequest(_) => ErrorKind::MalformedRequest,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::ValidationError,
            Self::TypeMismatch(_) => ErrorKind::TypeMismatch,
            Self::UnknownBlockType(_) => ErrorKind::UnknownBlockType,
            Self::OutOfRange(_) => ErrorKind::OutOfRange,
            Self::RevisionConflict(_) => ErrorKind::RevisionConflict,
            Self::Persistence(_) => ErrorKind::PersistenceFailure,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<BlockError> for ServerError {
    fn from(err: BlockError) -> Self {
        match err {
            BlockError::Validation(msg) => Self::Validation(msg),
            BlockError::TypeMismatch { .. } => Self::TypeMismatch(err.to_string()),
            BlockError::UnknownBlockType(_) => Self::UnknownBlockType(err.to_string()),
        }
    }
}

impl From<DocumentError> for ServerError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::PostNotFound(_)
            | DocumentError::BlockNotFound(_)
            | DocumentError::TargetNotFound(_) => Self::NotFound(err.to_string()),
            DocumentError::OutOfRange { .. } => Self::OutOfRange(err.to_string()),
            DocumentError::IndexOutOfBounds { .. } | DocumentError::DuplicateBlock(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RevisionConflict { .. } => Self::RevisionConflict(format!(
                "posts changed while this request was applied ({err}); reload and retry"
            )),
            other => Self::Persistence(other),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = %self.kind(), "{self}");
        } else {
            tracing::debug!(kind = %self.kind(), "{self}");
        }
        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

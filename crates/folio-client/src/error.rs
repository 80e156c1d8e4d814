use std::fmt;
use std::time::Duration;

use folio_protocol::ErrorKind;
use folio_types::BlockId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered with a non-2xx status.
    #[error("server returned {status}: {message}")]
    Api {
        status: u16,
        kind: Option<ErrorKind>,
        message: String,
    },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Commit(CommitFailure),
}

impl ClientError {
    /// Transport failures, timeouts and 5xx answers may succeed on a later
    /// attempt. Everything else is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Api { kind, .. } => *kind,
            _ => None,
        }
    }
}

/// One failed request within a commit.
#[derive(Debug)]
pub struct FailedChange {
    pub block_id: BlockId,
    pub error: ClientError,
}

/// Every request of a commit that did not succeed.
#[derive(Debug)]
pub struct CommitFailure {
    pub failed: Vec<FailedChange>,
}

impl CommitFailure {
    pub fn block_ids(&self) -> Vec<&BlockId> {
        self.failed.iter().map(|f| &f.block_id).collect()
    }
}

impl fmt::Display for CommitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to commit {} change(s)", self.failed.len())?;
        for (i, change) in self.failed.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{}: {}", change.block_id, change.error)?;
        }
        Ok(())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::retry::RetryPolicy;

/// Client settings. Durations are given in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are appended to.
    pub base_url: String,
    /// Limit for a single attempt, not for the whole retry sequence.
    pub timeout_ms: u64,
    /// Delay before the first retry; doubled for each further one.
    pub retry_base_delay_ms: u64,
    /// Retries after the first attempt for updates, adds and moves.
    pub mutation_retries: u32,
    /// Retries after the first attempt for deletes.
    pub delete_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3001/api".into(),
            timeout_ms: 10_000,
            retry_base_delay_ms: 1_000,
            mutation_retries: 3,
            delete_retries: 2,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> ClientResult<Self> {
        toml::from_str(s).map_err(|e| ClientError::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn policy(&self, retries: u32) -> RetryPolicy {
        RetryPolicy {
            retries,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            timeout: self.timeout(),
        }
    }

    /// Reads retry like mutations.
    pub fn read_policy(&self) -> RetryPolicy {
        self.policy(self.mutation_retries)
    }

    /// Post creation is not idempotent and is attempted once.
    pub fn create_policy(&self) -> RetryPolicy {
        self.policy(0)
    }

    pub fn mutation_policy(&self) -> RetryPolicy {
        self.policy(self.mutation_retries)
    }

    pub fn delete_policy(&self) -> RetryPolicy {
        self.policy(self.delete_retries)
    }
}

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// How concurrent mutations of the collection are reconciled.
///
/// Every mutation loads the whole collection, patches it in memory and
/// writes it back. The modes differ in what happens when two mutations
/// overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsistencyMode {
    /// No coordination: the later write replaces the whole collection,
    /// including posts the earlier write touched.
    #[default]
    LastWriterWins,
    /// Mutations in this process are serialized behind one lock held from
    /// load to save. Writers in other processes still race.
    Serialized,
    /// Saves carry the revision they loaded; a write that finds the
    /// collection changed fails with a revision conflict (HTTP 409).
    CompareAndSwap,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// JSON file holding the post collection.
    pub data_path: PathBuf,
    pub consistency: ConsistencyMode,
    /// Origins allowed by CORS. Empty disables the CORS layer.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            data_path: PathBuf::from("static").join("posts.json"),
            consistency: ConsistencyMode::default(),
            cors_origins: vec![
                "http://localhost:5173".into(),
                "http://localhost:3000".into(),
            ],
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys take their default values.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}

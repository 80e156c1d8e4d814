use std::sync::Arc;

use folio_store::{JsonFilePostStore, PostStore};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::service::EditService;

/// Folio content server.
pub struct FolioServer {
    config: ServerConfig,
    service: Arc<EditService>,
}

impl FolioServer {
    /// Server backed by the JSON file named in the config.
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(JsonFilePostStore::new(config.data_path.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: ServerConfig, store: Arc<dyn PostStore>) -> Self {
        let service = Arc::new(EditService::new(store, config.consistency));
        Self { config, service }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn service(&self) -> &Arc<EditService> {
        &self.service
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.service.clone(), &self.config.cors_origins)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            data = %self.config.data_path.display(),
            consistency = ?self.config.consistency,
            "Folio server listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsistencyMode;

    #[test]
    fn server_construction() {
        let server = FolioServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:3001".parse().unwrap());
        assert_eq!(server.service().consistency(), ConsistencyMode::LastWriterWins);
    }

    #[test]
    fn router_builds_without_cors() {
        let config = ServerConfig {
            cors_origins: vec![],
            ..ServerConfig::default()
        };
        let _router = FolioServer::new(config).router();
    }
}

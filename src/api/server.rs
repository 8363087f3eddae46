//! API Server
//!
//! Binds the REST router to a TCP listener and serves it until shutdown.

use crate::error::{Error, Result};
use crate::registry::RegistryService;
use std::net::SocketAddr;
use tokio::sync::broadcast;
use tracing::info;

use super::rest::RestRouter;

/// Port used when none is configured
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the API server
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// REST API bind address
    pub addr: SocketAddr,
}

impl ApiServerConfig {
    /// Build a config from a host and port pair
    pub fn from_host_port(host: &str, port: u16) -> Result<Self> {
        let addr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| Error::Configuration(format!("Invalid listen address {}: {}", host, e)))?;
        Ok(Self { addr })
    }
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        }
    }
}

// =============================================================================
// API Server
// =============================================================================

/// HTTP server for the registry API
pub struct ApiServer {
    config: ApiServerConfig,
    registry: RegistryService,
    shutdown_tx: broadcast::Sender<()>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiServerConfig, registry: RegistryService) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            registry,
            shutdown_tx,
        }
    }

    /// Bind and serve until [`shutdown`](Self::shutdown) is called
    pub async fn run(&self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.config.addr)
            .await
            .map_err(|e| Error::Internal(format!("Failed to bind REST server: {}", e)))?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: tokio::net::TcpListener) -> Result<()> {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let app = RestRouter::new(self.registry.clone()).build();

        let local_addr = listener.local_addr()?;
        info!("Server running on port {}", local_addr.port());

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("REST server shutting down");
            })
            .await
            .map_err(|e| Error::Internal(format!("REST server error: {}", e)))?;

        Ok(())
    }

    /// Trigger graceful shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

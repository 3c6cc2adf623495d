//! HTTP server startup and shutdown

use crate::api;
use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server around an initialized state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<()> {
        let app = api::build_app(self.state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        tracing::info!("📊 Sales dashboard listening on http://{}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.into()))?;

        Ok(())
    }
}

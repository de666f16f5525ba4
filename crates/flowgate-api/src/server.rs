//! Gateway server implementation.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::http::routes::create_router;
use crate::state::AppState;

/// Gateway listener configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl GatewayConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// The gateway HTTP server.
pub struct GatewayServer {
    config: GatewayConfig,
    state: Arc<AppState>,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Serve until Ctrl-C.
    pub async fn run(&self) -> std::io::Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
        })
        .await
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn run_until<F>(&self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = create_router(self.state.clone());

        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        info!("Gateway listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec_fetch::SpecFetcher;
    use crate::state::Credentials;
    use flowgate_gumloop::GumloopClient;

    fn create_test_state() -> Arc<AppState> {
        Arc::new(AppState::new(
            Arc::new(GumloopClient::new()),
            [("ai-search", "8cAwbUxMdbWMUJdQQAxuLE")].into_iter().collect(),
            Credentials::new("key", "user"),
            SpecFetcher::new("https://raw.githubusercontent.com/"),
        ))
    }

    #[test]
    fn test_gateway_config_default() {
        let config = GatewayConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_gateway_server_addr_format() {
        let server = GatewayServer::new(GatewayConfig::new("127.0.0.1", 3000), create_test_state());
        assert_eq!(server.addr(), "127.0.0.1:3000");
    }

    #[tokio::test]
    async fn test_run_until_stops_on_shutdown() {
        let server = GatewayServer::new(GatewayConfig::new("127.0.0.1", 0), create_test_state());
        server.run_until(async {}).await.unwrap();
    }
}

//! HTTP API Server
//!
//! axum server for the JobDash data service.
//!
//! ## Running the Server
//!
//! ```bash
//! # Start API server on the default port (5500)
//! MONGODB_URI=mongodb://localhost:27017/jobs jobdash serve
//!
//! # With custom bind address and port
//! jobdash serve --bind 127.0.0.1 --port 8080
//! ```

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::*;
use crate::error::{DashError, Result};
use crate::storage::DocumentStore;

/// Default listening port
pub const DEFAULT_PORT: u16 = 5500;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Bind address
    pub bind: String,
    /// Port
    pub port: u16,
    /// Enable CORS for all origins
    pub cors_enabled: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            cors_enabled: true,
        }
    }
}

impl ApiServerConfig {
    /// `bind:port` listen address
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// API HTTP Server
pub struct ApiServer {
    /// Configuration
    config: ApiServerConfig,
    /// Shared application state
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new API server over a connected store
    pub fn new(config: ApiServerConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(store)),
        }
    }

    /// Build the route table
    pub fn router(&self) -> Router {
        let router = Router::new()
            .route("/", get(handle_root))
            .route("/health", get(handle_health))
            .route("/api/users", get(handle_list_users))
            .route("/api/customers", get(handle_list_customers))
            .route("/api/jobs", get(handle_list_jobs))
            .route("/api/pipelines", get(handle_list_pipelines))
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::clone(&self.state));

        if self.config.cors_enabled {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                .max_age(Duration::from_secs(60 * 60));
            router.layer(cors)
        } else {
            router
        }
    }

    /// Bind the configured address
    pub async fn bind(&self) -> Result<TcpListener> {
        let address = self.config.address();
        info!("Binding to {address}");

        TcpListener::bind(&address)
            .await
            .map_err(|e| DashError::connection(&address, e.to_string()))
    }

    /// Run the server until Ctrl+C or SIGTERM
    pub async fn run(&self) -> Result<()> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr()?;
        info!("Server running on port {}", local.port());
        info!("Access test route at: http://localhost:{}", local.port());

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("API server shutting down");
        Ok(())
    }
}

async fn shutdown_signal() {
    let interrupt = async {
        if ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}

/// Start a server over `store` on an ephemeral local port
#[cfg(test)]
pub(crate) async fn spawn_for_tests(store: crate::storage::MemoryStore) -> std::net::SocketAddr {
    let config = ApiServerConfig {
        bind: "127.0.0.1".to_string(),
        port: 0,
        cors_enabled: true,
    };
    let server = ApiServer::new(config, Arc::new(store));
    let listener = server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move { server.serve(listener, std::future::pending()).await });
    addr
}

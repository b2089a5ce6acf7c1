//! HTTP server for the chat service

pub mod routes;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ChatConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Chat HTTP server
pub struct ChatServer {
    config: ChatConfig,
    state: AppState,
}

impl ChatServer {
    /// Create a server with state built from configuration
    pub fn new(config: ChatConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Create a server around existing state
    pub fn from_state(state: AppState) -> Self {
        Self {
            config: state.config().clone(),
            state,
        }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Result<Router> {
        let max_upload = self.config.server.max_upload_size;

        Ok(Router::new()
            .route("/", get(root))
            .route("/health", get(health_check))
            .route("/info", get(routes::info))
            .merge(routes::chat_routes(max_upload))
            // Paths used by the web client
            .nest("/api", routes::chat_routes(max_upload))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(self.cors_layer()?))
    }

    fn cors_layer(&self) -> Result<CorsLayer> {
        let origin = self.config.server.allowed_origin.as_str();
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);

        if origin == "*" {
            return Ok(cors.allow_origin(Any));
        }

        let origin = HeaderValue::from_str(origin)
            .map_err(|e| Error::Config(format!("Invalid allowed_origin '{}': {}", origin, e)))?;
        Ok(cors.allow_origin(origin))
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.router()?;

        tracing::info!("Starting chat server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Liveness text for browsers and curl
async fn root() -> &'static str {
    "Server is working!"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

//! API server initialization

use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::mcp;
use super::routes::health;
use crate::core::CoreApp;
use crate::core::constants::APP_NAME;

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    pub async fn start(self) -> Result<()> {
        let Self { app } = self;

        let shutdown = app.shutdown.clone();
        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let addr = SocketAddr::new(host.parse()?, port);

        let ct = mcp::cancellation_token_from_shutdown(&shutdown);
        let mcp_routes = mcp::routes(app.ads.clone(), app.config.reporting.clone(), ct);

        let router = Router::new()
            .route("/health", get(health::health))
            .nest("/mcp", mcp_routes)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "{} listening", APP_NAME);
        tracing::info!("MCP endpoint: http://{}/mcp", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        Ok(())
    }
}

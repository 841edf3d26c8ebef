use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use crate::core::config::ReportingConfig;
use crate::core::shutdown::ShutdownService;
use crate::googleads::GoogleAdsClient;

mod tools;
mod types;

use self::tools::McpServer;

type McpService = StreamableHttpService<McpServer>;

/// Shared state for MCP routes. Sessions are managed by a single shared
/// `LocalSessionManager`; the per-request `StreamableHttpService` is cheap
/// to construct and its factory captures the ads client and reporting
/// defaults.
#[derive(Clone)]
struct McpRouterState {
    ads: Arc<GoogleAdsClient>,
    reporting: ReportingConfig,
    ct: CancellationToken,
    session_manager: Arc<LocalSessionManager>,
}

pub fn routes(
    ads: Arc<GoogleAdsClient>,
    reporting: ReportingConfig,
    ct: CancellationToken,
) -> Router<()> {
    let state = McpRouterState {
        ads,
        reporting,
        ct,
        session_manager: Arc::new(LocalSessionManager::default()),
    };

    Router::new().fallback(mcp_proxy).with_state(state)
}

async fn mcp_proxy(State(state): State<McpRouterState>, req: axum::extract::Request) -> Response {
    let ads = state.ads.clone();
    let reporting = state.reporting.clone();
    let svc = McpService::new(
        move || Ok(McpServer::new(ads.clone(), reporting.clone())),
        state.session_manager.clone(),
        StreamableHttpServerConfig {
            cancellation_token: state.ct.clone(),
            ..Default::default()
        },
    );
    svc.oneshot(req).await.unwrap().into_response()
}

pub fn cancellation_token_from_shutdown(shutdown: &ShutdownService) -> CancellationToken {
    let token = CancellationToken::new();
    let mut rx = shutdown.subscribe();
    let t = token.clone();
    tokio::spawn(async move {
        let _ = rx.wait_for(|&v| v).await;
        t.cancel();
    });
    token
}

use axum::{
    routing::{any_service, get, post},
    Router,
};
use std::sync::Arc;

use crate::api;
use crate::infra::mcp::GatewaySvc;
use crate::infra::runtime::mcp_transport::{make_streamable_http_service, LocalSessionManager};
use crate::tools::dispatcher::Dispatcher;

/// `/healthz`, streamable MCP at `/mcp`, and the JSON shim under `/v1`.
pub fn build_app(dispatcher: Arc<Dispatcher>) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let mcp_service = make_streamable_http_service(GatewaySvc::new(dispatcher.clone()), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
        .route("/v1/tools", get(api::tools::list))
        .route("/v1/invoke", post(api::tools::invoke))
        .with_state(dispatcher)
}

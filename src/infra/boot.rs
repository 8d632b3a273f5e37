use std::net::SocketAddr;
use std::sync::Arc;

use crate::clients::model::ModelClient;
use crate::clients::openrouter::OpenRouterRemote;
use crate::infra::config::{Config, Mode};
use crate::tools::dispatcher::Dispatcher;
use crate::tools::registry::build_registry;

/// Wire registry, provider and model client together. Fails on a missing API
/// key or a duplicate tool name, before anything is served.
pub fn build_dispatcher(cfg: &Config) -> anyhow::Result<Arc<Dispatcher>> {
    let api_key = cfg.require_api_key()?;
    let provider = OpenRouterRemote::from_config(&cfg.provider, api_key)?;
    let registry = build_registry()?;
    Ok(Arc::new(Dispatcher::new(registry, ModelClient::new(provider))))
}

pub async fn run_server(cfg: Config) -> anyhow::Result<()> {
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        provider = %cfg.provider.base_url,
        debug = cfg.debug,
        "BOOT pair-mcp-gateway"
    );
    let dispatcher = build_dispatcher(&cfg)?;
    tracing::info!(tools = dispatcher.registry().len(), "tool registry ready");

    match cfg.mode {
        Mode::Stdio => {
            let svc = crate::infra::mcp::GatewaySvc::new(dispatcher);
            crate::infra::runtime::mcp_transport::serve_stdio(svc)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        Mode::Server => {
            let app = crate::infra::http_app::build_app(dispatcher);
            let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
            tracing::info!(%addr, "listening");
            axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
        }
    }
    Ok(())
}

//! Plain JSON shim next to MCP: list tools and invoke one by name.
//!
//! `POST /v1/invoke` answers `{"result": ..}` or `{"error": ..}` with status 200;
//! handled invocation errors are not HTTP failures.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value as J};

use crate::domain::{InvocationRequest, InvocationResponse};
use crate::tools::dispatcher::Dispatcher;

pub fn tools_list(dispatcher: &Dispatcher) -> J {
    let tools: Vec<J> = dispatcher
        .list()
        .into_iter()
        .map(|t| json!({ "name": t.name, "description": t.description, "inputSchema": t.input_schema }))
        .collect();
    json!({ "tools": tools })
}

pub async fn list(State(dispatcher): State<Arc<Dispatcher>>) -> Json<J> {
    Json(tools_list(&dispatcher))
}

pub async fn invoke(
    State(dispatcher): State<Arc<Dispatcher>>,
    Json(req): Json<InvocationRequest>,
) -> Json<InvocationResponse> {
    tracing::debug!(tool = %req.tool_name, "REST invoke");
    let resp = dispatcher.handle(&req).await;
    tracing::trace!(response = ?resp, "REST invoke completed");
    Json(resp)
}

use std::sync::Arc;

use axum::Router;
use http_body_util::BodyExt; // for .collect
use hyper::{header, Request, StatusCode};
use serde_json::{json, Value};
use tokio::time::{timeout, Duration};
use tower::ServiceExt; // for .oneshot

use pair_mcp_gateway::clients::model::ModelClient;
use pair_mcp_gateway::clients::openrouter::OpenRouterRemote;
use pair_mcp_gateway::infra::http_app::build_app;
use pair_mcp_gateway::tools::dispatcher::Dispatcher;
use pair_mcp_gateway::tools::registry::build_registry;

static MCP_PROTOCOL_VERSION: &str = "2025-03-26";

fn rpc(body: &Value, session: Option<&str>) -> Request<axum::body::Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::ACCEPT, "application/json, text/event-stream")
        .header(header::CONTENT_TYPE, "application/json")
        .header("MCP-Protocol-Version", MCP_PROTOCOL_VERSION);
    if let Some(id) = session {
        builder = builder.header("MCP-Session-Id", id);
    }
    builder.body(axum::body::Body::from(body.to_string())).unwrap()
}

async fn sse_json(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let s = String::from_utf8_lossy(&bytes);
    s.lines()
        .find_map(|line| line.strip_prefix("data: ").map(|d| d.to_string()))
        .and_then(|d| serde_json::from_str::<Value>(&d).ok())
        .expect("Did not find an rpcResponse in the event stream")
}

async fn initialized_session(app: &Router) -> String {
    let init = json!({
        "jsonrpc":"2.0","id":1,"method":"initialize",
        "params":{ "protocolVersion":MCP_PROTOCOL_VERSION,"capabilities":{},"clientInfo":{"name":"test","version":"0.1"} }
    });
    let init_res = app.clone().oneshot(rpc(&init, None)).await.unwrap();
    assert!(init_res.status().is_success());
    let session_id = init_res
        .headers()
        .get("MCP-Session-Id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();

    let notif = json!({"jsonrpc":"2.0","method":"notifications/initialized","params":{}});
    let res = app.clone().oneshot(rpc(&notif, Some(&session_id))).await.unwrap();
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    session_id
}

fn app_against(base: String) -> Router {
    let provider = OpenRouterRemote::new(base, "sk-or-test").unwrap();
    let dispatcher = Dispatcher::new(build_registry().unwrap(), ModelClient::new(provider));
    build_app(Arc::new(dispatcher))
}

#[tokio::test]
async fn streamable_initialize_list_and_call() {
    let server = httpmock::MockServer::start();
    let m = server.mock(|when, then| {
        when.method(httpmock::Method::POST)
            .path("/chat/completions")
            .json_body_partial(r#"{"model":"google/gemini-2.5-pro","temperature":0.7}"#);
        then.status(200).json_body(json!({
            "choices": [{"message": {"role":"assistant","content":"1. Shard by tenant"}}]
        }));
    });
    let app = app_against(server.base_url());
    let session_id = initialized_session(&app).await;

    let list = json!({"jsonrpc":"2.0","id":2,"method":"tools/list","params":{}});
    let list_res = timeout(Duration::from_secs(20), app.clone().oneshot(rpc(&list, Some(&session_id))))
        .await
        .unwrap()
        .unwrap();
    assert!(list_res.status().is_success());
    let v = sse_json(list_res).await;
    let tools = v["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 5);
    assert!(tools.iter().any(|t| t["name"] == "brainstorm"));

    let call = json!({
        "jsonrpc":"2.0","id":3,"method":"tools/call",
        "params": {"name":"brainstorm","arguments":{"topic":"scaling writes"}}
    });
    let call_res = app.clone().oneshot(rpc(&call, Some(&session_id))).await.unwrap();
    assert!(call_res.status().is_success());
    let v = sse_json(call_res).await;
    assert_eq!(v["result"]["content"][0]["text"], "1. Shard by tenant");
    assert_ne!(v["result"]["isError"], json!(true));
    m.assert();
}

#[tokio::test]
async fn streamable_call_reports_validation_error_as_tool_error() {
    let server = httpmock::MockServer::start();
    let m = server.mock(|when, then| {
        when.method(httpmock::Method::POST).path("/chat/completions");
        then.status(200).json_body(json!({"choices": [{"message": {"content": "unused"}}]}));
    });
    let app = app_against(server.base_url());
    let session_id = initialized_session(&app).await;

    let call = json!({
        "jsonrpc":"2.0","id":2,"method":"tools/call",
        "params": {"name":"review_performance","arguments":{}}
    });
    let call_res = app.clone().oneshot(rpc(&call, Some(&session_id))).await.unwrap();
    assert!(call_res.status().is_success());
    let v = sse_json(call_res).await;
    assert_eq!(v["result"]["isError"], json!(true));
    assert_eq!(v["result"]["content"][0]["text"], "Missing required argument: code");
    m.assert_hits(0);
}

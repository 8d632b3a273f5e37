//! MCP server integration (Streamable HTTP + stdio) for pair-mcp-gateway.
//!
//! - Lists the registered tools with their JSON Schemas
//! - Routes `tools/call` through the dispatcher
//! - Handled invocation errors come back as `isError: true` tool results, so
//!   the client sees the message instead of a protocol fault

use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo, Tool as McpTool,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler,
};

use crate::tools::dispatcher::Dispatcher;

const INSTRUCTIONS: &str = "Consult other AI models: `pair` for open-ended help, `review`, \
    `review_performance` and `review_security` for code review, `brainstorm` for ideas. \
    Pick a model with the optional `model` argument (O3, Gemini, Grok, DeepSeek, Opus).";

/// The MCP server handler. Cheap to clone; all state is behind an `Arc`.
#[derive(Clone)]
pub struct GatewaySvc {
    dispatcher: Arc<Dispatcher>,
}

impl GatewaySvc {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn tools(&self) -> Vec<McpTool> {
        self.dispatcher
            .list()
            .into_iter()
            .map(|meta| McpTool::new(meta.name, meta.description, Arc::new(meta.input_schema)))
            .collect()
    }

    pub async fn invoke(&self, request: CallToolRequestParam) -> CallToolResult {
        tracing::debug!(tool = %request.name, "tools/call received");
        let arguments = request.arguments.unwrap_or_default();
        match self.dispatcher.invoke(&request.name, &arguments).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
        }
    }
}

impl ServerHandler for GatewaySvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(INSTRUCTIONS.into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.invoke(request).await)
    }
}

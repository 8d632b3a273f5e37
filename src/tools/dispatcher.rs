use std::time::Instant;

use crate::clients::model::ModelClient;
use crate::core::error::InvocationError;
use crate::domain::{ArgumentField, InvocationRequest, InvocationResponse, JsonObject, ToolArgs};
use crate::infra::logging::log_metric;

use super::registry::{ToolMeta, ToolRegistry};

/// Resolves a tool, validates arguments against its schema, runs it, and
/// hands back text or a handled error. One pass per invocation, no retries.
#[derive(Clone)]
pub struct Dispatcher {
    registry: ToolRegistry,
    client: ModelClient,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry, client: ModelClient) -> Self {
        Self { registry, client }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn client(&self) -> &ModelClient {
        &self.client
    }

    pub fn list(&self) -> Vec<ToolMeta> {
        self.registry.list()
    }

    pub async fn invoke(&self, name: &str, arguments: &JsonObject) -> Result<String, InvocationError> {
        let tool = match self.registry.lookup(name) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(tool = name, "unknown tool requested");
                return Err(e);
            }
        };
        let tool_name = tool.name();
        metrics::counter!("tool_invocations_total", "tool" => tool_name).increment(1);
        tracing::info!(tool = tool_name, "tool invoked");

        let start = Instant::now();
        let res = match validate_arguments(tool.arguments(), arguments) {
            Ok(args) => tool.call(&args, &self.client).await,
            Err(e) => Err(e),
        };
        log_metric(tool_name, "tool_latency_ms", start.elapsed().as_millis() as f64);

        match &res {
            Ok(text) => tracing::info!(tool = tool_name, response_len = text.len(), "tool completed"),
            Err(e) => {
                metrics::counter!("tool_errors_total", "tool" => tool_name).increment(1);
                tracing::warn!(tool = tool_name, kind = e.kind(), error = %e, "tool failed");
            }
        }
        res
    }

    /// Handle a full request and package the outcome in its wire shape.
    pub async fn handle(&self, request: &InvocationRequest) -> InvocationResponse {
        self.invoke(&request.tool_name, &request.arguments).await.into()
    }
}

/// Check `arguments` against the declared fields. Undeclared keys are ignored.
pub fn validate_arguments(
    fields: &'static [ArgumentField],
    arguments: &JsonObject,
) -> Result<ToolArgs, InvocationError> {
    let mut args = ToolArgs::default();
    for field in fields {
        let raw = arguments.get(field.name).filter(|v| !v.is_null());
        args.insert(field.name, field.resolve(raw)?);
    }
    Ok(args)
}

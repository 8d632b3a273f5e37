use async_trait::async_trait;

use crate::clients::model::ModelClient;
use crate::core::error::InvocationError;
use crate::domain::models::DEFAULT_MODEL;
use crate::domain::{input_schema, ArgumentField, JsonObject, ToolArgs};

pub const MODEL_ARG: &str = "model";

/// Minimal metadata every tool must expose.
pub trait ToolSpec {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn arguments(&self) -> &'static [ArgumentField];

    fn input_schema(&self) -> JsonObject {
        input_schema(self.arguments())
    }
}

/// Where a tool's sampling temperature comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemperaturePolicy {
    /// Pinned by the tool; any caller value is ignored.
    Fixed(f64),
    /// Read from the named float argument (its schema default applies).
    Caller(&'static str),
}

/// Tool = ToolSpec + prompt template. `call` hands the prompt to the model client.
#[async_trait]
pub trait Tool: ToolSpec + Send + Sync {
    fn build_prompt(&self, args: &ToolArgs) -> String;

    fn temperature_policy(&self) -> TemperaturePolicy;

    fn temperature(&self, args: &ToolArgs) -> f64 {
        match self.temperature_policy() {
            TemperaturePolicy::Fixed(t) => t,
            TemperaturePolicy::Caller(arg) => args.float(arg).unwrap_or(0.5),
        }
    }

    fn model<'a>(&self, args: &'a ToolArgs) -> &'a str {
        args.text(MODEL_ARG).unwrap_or(DEFAULT_MODEL)
    }

    async fn call(&self, args: &ToolArgs, client: &ModelClient) -> Result<String, InvocationError> {
        let prompt = self.build_prompt(args);
        client.call(&prompt, self.model(args), self.temperature(args)).await
    }
}

use crate::core::tool::{TemperaturePolicy, Tool, ToolSpec, MODEL_ARG};
use crate::domain::models::DEFAULT_MODEL;
use crate::domain::{ArgumentField, ToolArgs};

const ARGS: &[ArgumentField] = &[
    ArgumentField::required_string("prompt", "What you want help with: a question, a design problem, or code to discuss"),
    ArgumentField::optional_string(MODEL_ARG, "Model nickname: O3, Gemini, Grok, DeepSeek or Opus", DEFAULT_MODEL),
    ArgumentField::optional_float("temperature", "Sampling temperature between 0 and 1", 0.5),
];

/// Free-form pair programming: the caller's prompt, framed as a collaborator.
#[derive(Clone, Default)]
pub struct PairTool;

impl ToolSpec for PairTool {
    fn name(&self) -> &'static str {
        "pair"
    }
    fn description(&self) -> &'static str {
        "Pair program with another AI model: ask questions, talk through a design, or get a second opinion"
    }
    fn arguments(&self) -> &'static [ArgumentField] {
        ARGS
    }
}

impl Tool for PairTool {
    fn build_prompt(&self, args: &ToolArgs) -> String {
        let prompt = args.text("prompt").unwrap_or_default();
        format!(
            "You are an experienced software engineer acting as a pair programming partner.\n\
             Work through the request below with the developer. Be concrete, point out \
             trade-offs, and show code where it helps.\n\
             \n\
             Request:\n\
             {prompt}"
        )
    }

    fn temperature_policy(&self) -> TemperaturePolicy {
        TemperaturePolicy::Caller("temperature")
    }
}

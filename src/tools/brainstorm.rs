use crate::core::tool::{TemperaturePolicy, Tool, ToolSpec, MODEL_ARG};
use crate::domain::models::DEFAULT_MODEL;
use crate::domain::{ArgumentField, ToolArgs};

pub const NO_CONSTRAINTS: &str = "No specific constraints";

const ARGS: &[ArgumentField] = &[
    ArgumentField::required_string("topic", "The problem or topic to brainstorm about"),
    ArgumentField::optional_string("constraints", "Limits the ideas must respect (budget, stack, deadlines)", ""),
    ArgumentField::optional_string(MODEL_ARG, "Model nickname: O3, Gemini, Grok, DeepSeek or Opus", DEFAULT_MODEL),
];

#[derive(Clone, Default)]
pub struct BrainstormTool;

impl ToolSpec for BrainstormTool {
    fn name(&self) -> &'static str {
        "brainstorm"
    }
    fn description(&self) -> &'static str {
        "Brainstorm ideas and approaches with another AI model"
    }
    fn arguments(&self) -> &'static [ArgumentField] {
        ARGS
    }
}

impl Tool for BrainstormTool {
    fn build_prompt(&self, args: &ToolArgs) -> String {
        let topic = args.text("topic").unwrap_or_default();
        let constraints = match args.text("constraints") {
            Some(c) if !c.trim().is_empty() => c,
            _ => NO_CONSTRAINTS,
        };
        format!(
            "Let's brainstorm creative solutions together.\n\
             \n\
             Topic: {topic}\n\
             \n\
             Constraints: {constraints}\n\
             \n\
             Please provide:\n\
             1. Several distinct approaches, including unconventional ones\n\
             2. Pros and cons of each\n\
             3. Potential challenges and how to address them\n\
             4. Your recommended approach and why\n\
             5. Concrete next steps"
        )
    }

    fn temperature_policy(&self) -> TemperaturePolicy {
        TemperaturePolicy::Fixed(0.7)
    }
}

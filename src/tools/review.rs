use crate::core::tool::{TemperaturePolicy, Tool, ToolSpec, MODEL_ARG};
use crate::domain::models::DEFAULT_MODEL;
use crate::domain::{ArgumentField, ToolArgs};

pub const NO_CONTEXT: &str = "No additional context provided";

const ARGS: &[ArgumentField] = &[
    ArgumentField::required_string("code", "The code to review"),
    ArgumentField::optional_string("context", "What the code is for, constraints, or areas of concern", ""),
    ArgumentField::optional_string(MODEL_ARG, "Model nickname: O3, Gemini, Grok, DeepSeek or Opus", DEFAULT_MODEL),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewKind {
    General,
    Performance,
    Security,
}

/// Code review in one of three flavours. All share the same schema and
/// differ in focus list and pinned temperature.
#[derive(Clone)]
pub struct ReviewTool {
    kind: ReviewKind,
}

impl ReviewTool {
    pub fn new(kind: ReviewKind) -> Self {
        Self { kind }
    }

    fn focus(&self) -> (&'static str, &'static str) {
        match self.kind {
            ReviewKind::General => (
                "Please review the following code and give constructive, specific feedback.",
                "1. Correctness: bugs, unhandled edge cases, error handling\n\
                 2. Readability and naming\n\
                 3. Design and structure\n\
                 4. Idiomatic use of the language and its libraries\n\
                 5. Concrete suggestions for improvement",
            ),
            ReviewKind::Performance => (
                "Please review the following code for performance problems.",
                "1. Algorithmic complexity and hot loops\n\
                 2. Memory allocation and copying\n\
                 3. I/O, network and database access patterns\n\
                 4. Concurrency, locking and parallelism opportunities\n\
                 5. Caching opportunities\n\
                 6. Concrete optimizations, ordered by expected impact",
            ),
            ReviewKind::Security => (
                "Please review the following code for security vulnerabilities.",
                "1. Injection (SQL, command, template, path traversal)\n\
                 2. Authentication and authorization flaws\n\
                 3. Secrets handling and sensitive data exposure\n\
                 4. Input validation and output encoding\n\
                 5. Unsafe deserialization and dependency risks\n\
                 6. Severity of each finding and how to fix it",
            ),
        }
    }
}

impl ToolSpec for ReviewTool {
    fn name(&self) -> &'static str {
        match self.kind {
            ReviewKind::General => "review",
            ReviewKind::Performance => "review_performance",
            ReviewKind::Security => "review_security",
        }
    }

    fn description(&self) -> &'static str {
        match self.kind {
            ReviewKind::General => "Get a code review from another AI model",
            ReviewKind::Performance => "Get a performance-focused code review from another AI model",
            ReviewKind::Security => "Get a security-focused code review from another AI model",
        }
    }

    fn arguments(&self) -> &'static [ArgumentField] {
        ARGS
    }
}

impl Tool for ReviewTool {
    fn build_prompt(&self, args: &ToolArgs) -> String {
        let code = args.text("code").unwrap_or_default();
        let context = match args.text("context") {
            Some(c) if !c.trim().is_empty() => c,
            _ => NO_CONTEXT,
        };
        let (intro, focus) = self.focus();
        format!(
            "{intro}\n\
             \n\
             Context: {context}\n\
             \n\
             Code:\n\
             ```\n\
             {code}\n\
             ```\n\
             \n\
             Focus on:\n\
             {focus}"
        )
    }

    fn temperature_policy(&self) -> TemperaturePolicy {
        match self.kind {
            ReviewKind::General | ReviewKind::Performance => TemperaturePolicy::Fixed(0.3),
            ReviewKind::Security => TemperaturePolicy::Fixed(0.2),
        }
    }
}

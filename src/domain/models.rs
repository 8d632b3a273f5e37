//! Fixed table of callable models, keyed by caller-facing nickname.

use crate::core::error::InvocationError;

pub const DEFAULT_MODEL: &str = "Gemini";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelEntry {
    pub nickname: &'static str,
    pub provider_model_id: &'static str,
    pub default_temperature: f64,
}

const MODELS: &[ModelEntry] = &[
    ModelEntry { nickname: "O3", provider_model_id: "openai/o3", default_temperature: 1.0 },
    ModelEntry { nickname: "Gemini", provider_model_id: "google/gemini-2.5-pro", default_temperature: 0.5 },
    ModelEntry { nickname: "Grok", provider_model_id: "x-ai/grok-4", default_temperature: 0.5 },
    ModelEntry { nickname: "DeepSeek", provider_model_id: "deepseek/deepseek-r1", default_temperature: 0.5 },
    ModelEntry { nickname: "Opus", provider_model_id: "anthropic/claude-opus-4", default_temperature: 0.5 },
];

#[derive(Debug)]
pub struct ModelRegistry {
    entries: &'static [ModelEntry],
}

static BUILTIN: ModelRegistry = ModelRegistry { entries: MODELS };

impl ModelRegistry {
    /// The process-wide table compiled into the binary.
    pub fn builtin() -> &'static ModelRegistry {
        &BUILTIN
    }

    pub fn entries(&self) -> &'static [ModelEntry] {
        self.entries
    }

    pub fn nicknames(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|e| e.nickname)
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, nickname: &str) -> Result<&'static ModelEntry, InvocationError> {
        self.entries
            .iter()
            .find(|e| e.nickname == nickname)
            .ok_or_else(|| InvocationError::UnknownModel {
                requested: nickname.to_owned(),
                valid: self.nicknames().collect::<Vec<_>>().join(", "),
            })
    }
}

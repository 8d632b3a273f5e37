use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::core::error::InvocationError;
use crate::core::tool::Tool;
use crate::domain::JsonObject;

use super::brainstorm::BrainstormTool;
use super::pair::PairTool;
use super::review::{ReviewKind, ReviewTool};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate tool name: {0}")]
    DuplicateTool(&'static str),
}

/// Ordered, name-indexed set of tools. Built at startup, read-only afterwards.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<(), RegistryError> {
        let name = tool.name();
        if self.by_name.contains_key(name) {
            return Err(RegistryError::DuplicateTool(name));
        }
        self.by_name.insert(name, self.tools.len());
        self.tools.push(Arc::new(tool));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<Arc<dyn Tool>, InvocationError> {
        self.by_name
            .get(name)
            .map(|&i| self.tools[i].clone())
            .ok_or_else(|| InvocationError::UnknownTool(name.to_owned()))
    }

    /// Tool metadata in registration order, for protocol listing.
    pub fn list(&self) -> Vec<ToolMeta> {
        self.tools
            .iter()
            .map(|t| ToolMeta {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: JsonObject,
}

/// The five built-in tools, in listing order.
pub fn build_registry() -> Result<ToolRegistry, RegistryError> {
    let mut reg = ToolRegistry::new();
    reg.register(PairTool)?;
    reg.register(ReviewTool::new(ReviewKind::General))?;
    reg.register(BrainstormTool)?;
    reg.register(ReviewTool::new(ReviewKind::Performance))?;
    reg.register(ReviewTool::new(ReviewKind::Security))?;
    Ok(reg)
}

//! pair-mcp-gateway: MCP tools that hand code, topics and prompts to a second
//! LLM (via OpenRouter) and return its answer.

pub mod api;
pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;

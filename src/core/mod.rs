//! Core types & traits: domain-agnostic contracts for tools and errors.

pub mod error;
pub mod tool;

//! Infrastructure layer for aikit.
//!
//! Contains the concrete LLM provider bindings (OpenAI-compatible, Anthropic,
//! and the multi-model gateway), the provider factory, ready-made agent
//! constructors, and the configuration file loader.

pub mod agent;
pub mod config;
pub mod llm;

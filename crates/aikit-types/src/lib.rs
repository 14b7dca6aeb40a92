//! Shared domain types for aikit.
//!
//! LLM request/response shapes, provider selection, the agent context and
//! result envelope, title generation input/output, configuration types, and
//! their error enums.
//!
//! No IO dependencies -- only serde, secrecy, thiserror.

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod title;

//! Agent execution core and provider trait for aikit.
//!
//! This crate defines the `LlmProvider` port that the infrastructure layer
//! implements, the shared agent execution flow, and the title generation
//! agent. It depends only on `aikit-types` -- never on `aikit-infra` or
//! any HTTP crate.

pub mod agent;
pub mod llm;

//! Agents for aikit.
//!
//! - `Agent`: the task-specific behaviour an agent plugs in
//! - `AgentEngine`: runs any `Agent` against a provider and returns an `AgentResult`
//! - `TitleGenerator`: names chat conversations

pub mod engine;
pub mod title;

pub use engine::{Agent, AgentEngine};
pub use title::TitleGenerator;

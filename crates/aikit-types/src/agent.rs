//! Agent execution types for aikit.
//!
//! `AgentContext` is the caller-owned, per-call context handed to an agent;
//! `AgentResult` is the uniform envelope every execution returns.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::llm::{LlmError, Usage};

/// Per-call context passed through to prompt builders and echoed into
/// result metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl AgentContext {
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Metadata attached to every [`AgentResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Wall-clock time of the execution in milliseconds.
    pub execution_time_ms: u64,
    /// Name of the provider that served (or failed) the call.
    pub provider: String,
    /// Context metadata, only merged on success.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultMetadata {
    pub const RESERVED_KEYS: [&'static str; 2] = ["execution_time_ms", "provider"];
}

/// Uniform result envelope for an agent execution.
///
/// Exactly one of `data` (on success) or `error` (on failure) is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    pub metadata: ResultMetadata,
}

impl<T> AgentResult<T> {
    pub fn succeeded(data: T, usage: Option<Usage>, metadata: ResultMetadata) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            usage,
            metadata,
        }
    }

    pub fn failed(error: impl Into<String>, metadata: ResultMetadata) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            usage: None,
            metadata,
        }
    }
}

/// Errors raised inside an agent execution.
///
/// Every variant displays as its bare message; the execution core copies
/// that message into [`AgentResult::error`] without adding context.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error("{0}")]
    Parse(String),

    #[error("provider call timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl AgentError {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentError::Validation(_) => "validation",
            AgentError::Provider(_) => "provider",
            AgentError::Parse(_) => "parse",
            AgentError::Timeout(_) => "timeout",
        }
    }
}

//! LLM request/response types for aikit.
//!
//! These types model the data shapes for provider interactions: completion
//! requests, token usage, backend selection, and error handling.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Request to an LLM provider for a completion.
///
/// The model is bound when the provider is constructed, so it is not part
/// of the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Response from an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Token usage reported by a provider. Backends report different subsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u32>,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("context length exceeded")]
    ContextLengthExceeded,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// A concrete LLM backend reachable with its own API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
    Groq,
    Google,
}

impl Backend {
    /// Name of the conventional API key variable for this backend.
    pub fn api_key_var(&self) -> String {
        format!("{}_API_KEY", self.to_string().to_uppercase())
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::OpenAi => write!(f, "openai"),
            Backend::Anthropic => write!(f, "anthropic"),
            Backend::Groq => write!(f, "groq"),
            Backend::Google => write!(f, "google"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Backend::OpenAi),
            "anthropic" => Ok(Backend::Anthropic),
            "groq" => Ok(Backend::Groq),
            "google" => Ok(Backend::Google),
            other => Err(format!("invalid backend: '{other}'")),
        }
    }
}

/// Provider kind as named in configuration.
///
/// `Vercel` is the multi-model gateway: it wraps a second selection of the
/// underlying model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Vercel,
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
    Groq,
    Google,
}

impl ProviderKind {
    /// The direct backend for this kind, or `None` for the gateway.
    pub fn backend(&self) -> Option<Backend> {
        match self {
            ProviderKind::Vercel => None,
            ProviderKind::OpenAi => Some(Backend::OpenAi),
            ProviderKind::Anthropic => Some(Backend::Anthropic),
            ProviderKind::Groq => Some(Backend::Groq),
            ProviderKind::Google => Some(Backend::Google),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Vercel => write!(f, "vercel"),
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Anthropic => write!(f, "anthropic"),
            ProviderKind::Groq => write!(f, "groq"),
            ProviderKind::Google => write!(f, "google"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vercel" => Ok(ProviderKind::Vercel),
            other => other
                .parse::<Backend>()
                .map(ProviderKind::from)
                .map_err(|_| format!("invalid provider kind: '{other}'")),
        }
    }
}

impl From<Backend> for ProviderKind {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::OpenAi => ProviderKind::OpenAi,
            Backend::Anthropic => ProviderKind::Anthropic,
            Backend::Groq => ProviderKind::Groq,
            Backend::Google => ProviderKind::Google,
        }
    }
}

/// Fully-resolved provider selection, ready for construction.
///
/// Produced by resolving configuration; credentials are already in hand.
/// Does not derive `Clone` or `Serialize` so the key is not copied or
/// written out by accident.
#[derive(Debug)]
pub enum ProviderSelection {
    /// Talk to a backend's own API.
    Direct {
        backend: Backend,
        api_key: SecretString,
        model: String,
        base_url: Option<String>,
    },
    /// Route through the multi-model gateway to the given model family.
    Gateway {
        family: Backend,
        api_key: SecretString,
        model: String,
    },
}

impl ProviderSelection {
    /// The configured kind this selection was resolved from.
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderSelection::Direct { backend, .. } => ProviderKind::from(*backend),
            ProviderSelection::Gateway { .. } => ProviderKind::Vercel,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            ProviderSelection::Direct { model, .. } | ProviderSelection::Gateway { model, .. } => {
                model
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let role = MessageRole::Assistant;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_usage_default_is_empty() {
        let usage = Usage::default();
        assert!(usage.input_tokens.is_none());
        assert!(usage.output_tokens.is_none());
        assert!(usage.total_tokens.is_none());
        assert_eq!(serde_json::to_string(&usage).unwrap(), "{}");
    }

    #[test]
    fn test_request_skips_unset_fields() {
        let request = CompletionRequest {
            messages: vec![Message::user("hi")],
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system").is_none());
        assert!(json.get("temperature").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::Provider {
            message: "connection reset".to_string(),
        };
        assert_eq!(err.to_string(), "provider error: connection reset");
    }

    #[test]
    fn test_provider_kind_roundtrip() {
        for kind in [
            ProviderKind::Vercel,
            ProviderKind::OpenAi,
            ProviderKind::Anthropic,
            ProviderKind::Groq,
            ProviderKind::Google,
        ] {
            let parsed: ProviderKind = kind.to_string().parse().unwrap();
            assert_eq!(kind, parsed);
        }
        assert!("bedrock".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_provider_kind_serde() {
        let json = serde_json::to_string(&ProviderKind::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");
        let parsed: ProviderKind = serde_json::from_str("\"vercel\"").unwrap();
        assert_eq!(parsed, ProviderKind::Vercel);
        assert_eq!(parsed.backend(), None);
    }

    #[test]
    fn test_backend_api_key_var() {
        assert_eq!(Backend::OpenAi.api_key_var(), "OPENAI_API_KEY");
        assert_eq!(Backend::Google.api_key_var(), "GOOGLE_API_KEY");
    }

    #[test]
    fn test_selection_kind_and_model() {
        let selection = ProviderSelection::Gateway {
            family: Backend::Groq,
            api_key: SecretString::from("key"),
            model: "llama-3.1-8b-instant".to_string(),
        };
        assert_eq!(selection.kind(), ProviderKind::Vercel);
        assert_eq!(selection.model(), "llama-3.1-8b-instant");
    }
}

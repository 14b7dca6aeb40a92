//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] serves OpenAI, Groq, and Google
//! Gemini via configurable base URLs and factory functions.
//!
//! Uses [`async_openai`] for type-safe request/response handling.

pub mod config;

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use async_openai::Client;
use secrecy::{ExposeSecret, SecretString};

use aikit_core::llm::provider::LlmProvider;
use aikit_types::llm::{
    Backend, CompletionRequest, CompletionResponse, LlmError, MessageRole, Usage,
};

use self::config::OpenAiCompatConfig;

/// Unified provider for any OpenAI-compatible API.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
    has_api_key: bool,
}

impl OpenAiCompatibleProvider {
    /// Create a new OpenAI-compatible provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let api_key = config.api_key.expose_secret();
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
            model: config.model,
            has_api_key: !api_key.trim().is_empty(),
        }
    }

    /// Preset configuration for an OpenAI-compatible backend.
    ///
    /// Returns `None` for backends with their own protocol (Anthropic).
    pub fn defaults_for(backend: Backend, api_key: SecretString, model: &str) -> Option<OpenAiCompatConfig> {
        match backend {
            Backend::OpenAi => Some(config::openai_defaults(api_key, model)),
            Backend::Groq => Some(config::groq_defaults(api_key, model)),
            Backend::Google => Some(config::google_defaults(api_key, model)),
            Backend::Anthropic => None,
        }
    }

    /// Create an OpenAI provider.
    pub fn openai(api_key: SecretString, model: &str) -> Self {
        Self::new(config::openai_defaults(api_key, model))
    }

    /// Create a Groq provider.
    pub fn groq(api_key: SecretString, model: &str) -> Self {
        Self::new(config::groq_defaults(api_key, model))
    }

    /// Create a Google Gemini provider.
    pub fn google(api_key: SecretString, model: &str) -> Self {
        Self::new(config::google_defaults(api_key, model))
    }

    /// The model this provider sends requests to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(ref system) = request.system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(system.clone()),
                    name: None,
                },
            ));
        }

        for msg in &request.messages {
            let oai_msg = match msg.role {
                MessageRole::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
                MessageRole::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessage {
                            content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                                msg.content.clone(),
                            )),
                            refusal: None,
                            name: None,
                            audio: None,
                            tool_calls: None,
                            function_call: None,
                        },
                    )
                }
            };
            messages.push(oai_msg);
        }

        CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_completion_tokens: request.max_tokens,
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let usage = response.usage.map(|u| Usage {
            input_tokens: Some(u.prompt_tokens),
            output_tokens: Some(u.completion_tokens),
            total_tokens: Some(u.total_tokens),
        });

        Ok(CompletionResponse { content, usage })
    }

    async fn validate(&self) -> bool {
        self.has_api_key
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited {
                    retry_after_ms: None,
                }
            } else if code == "context_length_exceeded"
                || api_err.message.contains("maximum context length")
            {
                LlmError::ContextLengthExceeded
            } else if code == "server_error" || error_type == "overloaded_error" {
                LlmError::Overloaded(api_err.message.clone())
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status().map(|s| s.as_u16()) {
            Some(401) => LlmError::AuthenticationFailed,
            Some(429) => LlmError::RateLimited {
                retry_after_ms: None,
            },
            Some(503) | Some(529) => LlmError::Overloaded(err.to_string()),
            _ => LlmError::Provider {
                message: err.to_string(),
            },
        },
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aikit_types::llm::Message;

    fn key() -> SecretString {
        SecretString::from("sk-test")
    }

    #[test]
    fn test_factories_set_name_and_model() {
        let provider = OpenAiCompatibleProvider::openai(key(), "gpt-4o");
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4o");

        let provider = OpenAiCompatibleProvider::groq(key(), "llama-3.1-8b-instant");
        assert_eq!(provider.name(), "groq");

        let provider = OpenAiCompatibleProvider::google(key(), "gemini-2.5-flash");
        assert_eq!(provider.name(), "google");
        assert_eq!(provider.model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_defaults_for_anthropic_is_none() {
        assert!(OpenAiCompatibleProvider::defaults_for(Backend::Anthropic, key(), "m").is_none());
        let config = OpenAiCompatibleProvider::defaults_for(Backend::Groq, key(), "m").unwrap();
        assert_eq!(config.provider_name, "groq");
    }

    #[tokio::test]
    async fn test_validate_reports_key_presence() {
        assert!(OpenAiCompatibleProvider::openai(key(), "gpt-4o").validate().await);
        let blank = OpenAiCompatibleProvider::openai(SecretString::from(""), "gpt-4o");
        assert!(!blank.validate().await);
    }

    #[test]
    fn test_build_request_messages() {
        let provider = OpenAiCompatibleProvider::openai(key(), "gpt-4o");
        let request = CompletionRequest {
            system: Some("Be helpful".to_string()),
            messages: vec![Message::user("Hello"), Message::assistant("Hi there!")],
            temperature: Some(0.5),
            max_tokens: Some(50),
        };

        let oai_req = provider.build_request(&request);
        assert_eq!(oai_req.model, "gpt-4o");
        // 1 system + 2 conversation = 3 messages
        assert_eq!(oai_req.messages.len(), 3);
        assert_eq!(oai_req.max_completion_tokens, Some(50));
        assert_eq!(oai_req.temperature, Some(0.5));
        assert!(oai_req.stream.is_none());
    }

    #[test]
    fn test_build_request_without_system_or_limits() {
        let provider = OpenAiCompatibleProvider::groq(key(), "llama-3.1-8b-instant");
        let request = CompletionRequest {
            messages: vec![Message::user("Hello")],
            ..Default::default()
        };

        let oai_req = provider.build_request(&request);
        assert_eq!(oai_req.messages.len(), 1);
        assert!(oai_req.max_completion_tokens.is_none());
        assert!(oai_req.temperature.is_none());
    }

    #[test]
    fn test_map_openai_error_api_auth() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Incorrect API key provided".to_string(),
            r#type: Some("authentication_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[test]
    fn test_map_openai_error_context_length() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "This model's maximum context length is 8192 tokens".to_string(),
            r#type: Some("invalid_request_error".to_string()),
            param: None,
            code: Some("context_length_exceeded".to_string()),
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::ContextLengthExceeded));
    }

    #[test]
    fn test_map_openai_error_invalid_argument() {
        use async_openai::error::OpenAIError;
        let err = map_openai_error(OpenAIError::InvalidArgument("bad arg".to_string()));
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }
}

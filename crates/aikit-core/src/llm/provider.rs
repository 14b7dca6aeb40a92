//! LlmProvider trait definition.
//!
//! This is the capability every LLM backend binding implements. Uses RPITIT
//! for the async methods; [`super::box_provider::BoxLlmProvider`] erases the
//! concrete type for runtime selection.

use std::future::Future;

use aikit_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (OpenAI, Anthropic, Groq, etc.).
///
/// Implementations live in aikit-infra. A failed call is reported as an
/// [`LlmError`]; callers do not retry.
pub trait LlmProvider: Send + Sync {
    /// Backend identifier reported in result metadata (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// Check whether the binding is usable (credentials present, etc.).
    ///
    /// Not called by the agent engine; callers may probe before use.
    fn validate(&self) -> impl Future<Output = bool> + Send;
}

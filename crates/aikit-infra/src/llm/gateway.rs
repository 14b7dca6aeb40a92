//! Multi-model gateway provider.
//!
//! The gateway kind ("vercel" in configuration) routes to one of the
//! concrete model families. It reports its own name so result metadata
//! shows the gateway rather than the family behind it.

use aikit_core::llm::box_provider::BoxLlmProvider;
use aikit_core::llm::provider::LlmProvider;
use aikit_types::llm::{Backend, CompletionRequest, CompletionResponse, LlmError};

/// Provider that forwards every call to the selected model family.
pub struct GatewayProvider {
    family: Backend,
    inner: BoxLlmProvider,
}

impl GatewayProvider {
    pub const NAME: &'static str = "vercel";

    pub fn new(family: Backend, inner: BoxLlmProvider) -> Self {
        Self { family, inner }
    }

    /// The model family requests are routed to.
    pub fn family(&self) -> Backend {
        self.family
    }
}

impl LlmProvider for GatewayProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.inner.complete(request).await
    }

    async fn validate(&self) -> bool {
        self.inner.validate().await
    }
}

//! Ready-made agent constructors.
//!
//! Callers supply either an existing provider or a provider selection to be
//! built with [`create_provider`]. The resulting engine is bound to that
//! provider for its lifetime.

use std::sync::Arc;

use aikit_core::agent::{AgentEngine, TitleGenerator};
use aikit_core::llm::box_provider::BoxLlmProvider;
use aikit_types::llm::{LlmError, ProviderSelection};

use crate::llm::create_provider;

/// Where an agent's provider comes from.
pub enum ProviderSource {
    /// A provider that is already built, possibly shared with other agents.
    Provider(Arc<BoxLlmProvider>),
    /// A selection to build a new provider from.
    Selection(ProviderSelection),
}

impl ProviderSource {
    /// Build (or unwrap) the provider.
    ///
    /// # Errors
    ///
    /// Propagates [`create_provider`] failures for selections.
    pub fn into_provider(self) -> Result<Arc<BoxLlmProvider>, LlmError> {
        match self {
            Self::Provider(provider) => Ok(provider),
            Self::Selection(selection) => create_provider(&selection).map(Arc::new),
        }
    }
}

impl From<BoxLlmProvider> for ProviderSource {
    fn from(provider: BoxLlmProvider) -> Self {
        Self::Provider(Arc::new(provider))
    }
}

impl From<Arc<BoxLlmProvider>> for ProviderSource {
    fn from(provider: Arc<BoxLlmProvider>) -> Self {
        Self::Provider(provider)
    }
}

impl From<ProviderSelection> for ProviderSource {
    fn from(selection: ProviderSelection) -> Self {
        Self::Selection(selection)
    }
}

/// Create a title generation agent.
///
/// # Errors
///
/// Returns [`LlmError::InvalidRequest`] when a selection has a blank model
/// or API key.
pub fn title_agent(
    source: impl Into<ProviderSource>,
) -> Result<AgentEngine<TitleGenerator>, LlmError> {
    let provider = source.into().into_provider()?;
    tracing::debug!(provider = %provider.name(), "title agent created");
    Ok(AgentEngine::new(TitleGenerator, provider))
}

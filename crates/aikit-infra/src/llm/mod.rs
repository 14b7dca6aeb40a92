//! LLM provider implementations.
//!
//! Contains concrete implementations of the [`LlmProvider`] trait defined in
//! `aikit-core`, and a provider factory ([`create_provider`]) that builds the
//! right binding from a resolved [`ProviderSelection`].
//!
//! [`LlmProvider`]: aikit_core::llm::provider::LlmProvider

pub mod anthropic;
pub mod gateway;
pub mod openai_compat;

use secrecy::{ExposeSecret, SecretString};

use aikit_core::llm::box_provider::BoxLlmProvider;
use aikit_types::llm::{Backend, LlmError, ProviderSelection};

use self::anthropic::AnthropicProvider;
use self::gateway::GatewayProvider;
use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] from a resolved [`ProviderSelection`].
///
/// # Errors
///
/// Returns [`LlmError::InvalidRequest`] if the API key or model is blank,
/// so a bad configuration fails before any agent executes.
#[tracing::instrument(name = "create_provider", skip(selection), fields(kind = %selection.kind(), model = %selection.model()))]
pub fn create_provider(selection: &ProviderSelection) -> Result<BoxLlmProvider, LlmError> {
    match selection {
        ProviderSelection::Direct {
            backend,
            api_key,
            model,
            base_url,
        } => {
            ensure_present(*backend, api_key, model)?;
            direct_provider(*backend, api_key, model, base_url.as_deref())
        }
        ProviderSelection::Gateway {
            family,
            api_key,
            model,
        } => {
            ensure_present(*family, api_key, model)?;
            let inner = direct_provider(*family, api_key, model, None)?;
            Ok(BoxLlmProvider::new(GatewayProvider::new(*family, inner)))
        }
    }
}

fn direct_provider(
    backend: Backend,
    api_key: &SecretString,
    model: &str,
    base_url: Option<&str>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = SecretString::from(api_key.expose_secret().to_string());

    match OpenAiCompatibleProvider::defaults_for(backend, key, model) {
        Some(config) => {
            let config = match base_url {
                Some(url) => config.with_base_url(url),
                None => config,
            };
            Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(config)))
        }
        None => {
            let key = SecretString::from(api_key.expose_secret().to_string());
            let mut provider = AnthropicProvider::new(key, model.to_string())?;
            if let Some(url) = base_url {
                provider = provider.with_base_url(url.to_string());
            }
            Ok(BoxLlmProvider::new(provider))
        }
    }
}

fn ensure_present(backend: Backend, api_key: &SecretString, model: &str) -> Result<(), LlmError> {
    if model.trim().is_empty() {
        return Err(LlmError::InvalidRequest(format!(
            "model name is required for '{backend}' provider"
        )));
    }
    if api_key.expose_secret().trim().is_empty() {
        return Err(LlmError::InvalidRequest(format!(
            "API key is required for '{backend}' provider"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct(backend: Backend, model: &str) -> ProviderSelection {
        ProviderSelection::Direct {
            backend,
            api_key: SecretString::from("sk-test"),
            model: model.to_string(),
            base_url: None,
        }
    }

    #[test]
    fn test_create_provider_direct_backends() {
        for (backend, model) in [
            (Backend::OpenAi, "gpt-4o"),
            (Backend::Anthropic, "claude-sonnet-4-20250514"),
            (Backend::Groq, "llama-3.1-8b-instant"),
            (Backend::Google, "gemini-2.5-flash"),
        ] {
            let provider = create_provider(&direct(backend, model)).unwrap();
            assert_eq!(provider.name(), backend.to_string());
        }
    }

    #[test]
    fn test_create_provider_with_base_url() {
        let selection = ProviderSelection::Direct {
            backend: Backend::OpenAi,
            api_key: SecretString::from("sk-test"),
            model: "custom-model".to_string(),
            base_url: Some("https://proxy.example.com/v1".to_string()),
        };
        let provider = create_provider(&selection).unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_create_provider_gateway() {
        let selection = ProviderSelection::Gateway {
            family: Backend::Anthropic,
            api_key: SecretString::from("sk-test"),
            model: "claude-sonnet-4-20250514".to_string(),
        };
        let provider = create_provider(&selection).unwrap();
        assert_eq!(provider.name(), "vercel");
    }

    #[test]
    fn test_create_provider_rejects_blank_fields() {
        let err = create_provider(&direct(Backend::Groq, "  ")).err().unwrap();
        assert_eq!(
            err.to_string(),
            "invalid request: model name is required for 'groq' provider"
        );

        let selection = ProviderSelection::Gateway {
            family: Backend::OpenAi,
            api_key: SecretString::from(""),
            model: "gpt-4o".to_string(),
        };
        let err = create_provider(&selection).err().unwrap();
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }
}

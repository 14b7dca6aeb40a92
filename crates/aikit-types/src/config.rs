//! Configuration types for aikit.
//!
//! `ToolkitConfig` represents the `aikit.toml` file. `ProviderSettings` holds
//! the raw, possibly incomplete provider section; [`ProviderSettings::resolve`]
//! turns it into a [`ProviderSelection`] with credentials in hand.

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::llm::{Backend, ProviderKind, ProviderSelection};

/// Top-level configuration file.
#[derive(Debug, Deserialize)]
pub struct ToolkitConfig {
    pub provider: ProviderSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

/// Tracing options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelemetrySettings {
    /// Export spans to stdout through OpenTelemetry.
    #[serde(default)]
    pub otel_stdout: bool,
}

/// Provider section as written by the user.
#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Underlying model family, required for the gateway kind.
    #[serde(default)]
    pub gateway: Option<GatewayModel>,
}

/// Model family selection behind the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayModel {
    pub family: Backend,
    pub model: String,
}

impl ProviderSettings {
    /// Resolve into a complete selection.
    ///
    /// The API key comes from the settings, else from `lookup` called with
    /// the backend's conventional variable name (e.g. `OPENAI_API_KEY`; for
    /// the gateway, the family's). The caller decides where `lookup` reads
    /// from.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the model, gateway section, or API key
    /// cannot be determined, or when the gateway kind sets `base_url`.
    pub fn resolve<F>(self, lookup: F) -> Result<ProviderSelection, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = self.kind;
        let resolve_key = |backend: Backend, explicit: Option<SecretString>| {
            explicit
                .or_else(|| lookup(&backend.api_key_var()).map(SecretString::from))
                .ok_or(ConfigError::MissingApiKey { provider: kind })
        };

        match kind.backend() {
            Some(backend) => {
                let model = non_blank(self.model).ok_or(ConfigError::MissingModel { provider: kind })?;
                let api_key = resolve_key(backend, self.api_key)?;
                Ok(ProviderSelection::Direct {
                    backend,
                    api_key,
                    model,
                    base_url: self.base_url,
                })
            }
            None => {
                if self.base_url.is_some() {
                    return Err(ConfigError::GatewayBaseUrl);
                }
                let gateway = self.gateway.ok_or(ConfigError::MissingGatewayModel)?;
                let model = non_blank(Some(gateway.model)).ok_or(ConfigError::MissingGatewayModel)?;
                let api_key = resolve_key(gateway.family, self.api_key)?;
                Ok(ProviderSelection::Gateway {
                    family: gateway.family,
                    api_key,
                    model,
                })
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn parse(toml_str: &str) -> ToolkitConfig {
        toml::from_str(toml_str).unwrap()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_direct_with_inline_key() {
        let config = parse(
            r#"
[provider]
kind = "openai"
model = "gpt-4o"
api_key = "sk-inline"
"#,
        );
        assert!(!config.telemetry.otel_stdout);

        match config.provider.resolve(no_env).unwrap() {
            ProviderSelection::Direct {
                backend,
                api_key,
                model,
                base_url,
            } => {
                assert_eq!(backend, Backend::OpenAi);
                assert_eq!(api_key.expose_secret(), "sk-inline");
                assert_eq!(model, "gpt-4o");
                assert!(base_url.is_none());
            }
            other => panic!("expected direct selection, got {other:?}"),
        }
    }

    #[test]
    fn test_key_falls_back_to_lookup() {
        let config = parse(
            r#"
[provider]
kind = "groq"
model = "llama-3.1-8b-instant"
"#,
        );
        let selection = config
            .provider
            .resolve(|name| (name == "GROQ_API_KEY").then(|| "gsk-env".to_string()))
            .unwrap();
        match selection {
            ProviderSelection::Direct { api_key, .. } => {
                assert_eq!(api_key.expose_secret(), "gsk-env");
            }
            other => panic!("expected direct selection, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_model_is_rejected() {
        let config = parse(
            r#"
[provider]
kind = "anthropic"
api_key = "key"
"#,
        );
        let err = config.provider.resolve(no_env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingModel {
                provider: ProviderKind::Anthropic
            }
        ));
        assert_eq!(err.to_string(), "model name is required for 'anthropic' provider");
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let config = parse(
            r#"
[provider]
kind = "google"
model = "gemini-2.5-flash"
"#,
        );
        let err = config.provider.resolve(no_env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
    }

    #[test]
    fn test_gateway_selection() {
        let config = parse(
            r#"
[provider]
kind = "vercel"
api_key = "key"

[provider.gateway]
family = "openai"
model = "gpt-4o"

[telemetry]
otel_stdout = true
"#,
        );
        assert!(config.telemetry.otel_stdout);
        let selection = config.provider.resolve(no_env).unwrap();
        assert_eq!(selection.kind(), ProviderKind::Vercel);
        assert_eq!(selection.model(), "gpt-4o");
    }

    #[test]
    fn test_gateway_requires_model_family() {
        let config = parse(
            r#"
[provider]
kind = "vercel"
api_key = "key"
"#,
        );
        let err = config.provider.resolve(no_env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingGatewayModel));
    }

    #[test]
    fn test_gateway_rejects_base_url() {
        let config = parse(
            r#"
[provider]
kind = "vercel"
api_key = "sk-gw"
base_url = "https://proxy.example.com/v1"

[provider.gateway]
family = "openai"
model = "gpt-4o"
"#,
        );
        let err = config.provider.resolve(no_env).unwrap_err();
        assert!(matches!(err, ConfigError::GatewayBaseUrl));
        assert_eq!(
            err.to_string(),
            "base_url is not supported for 'vercel' provider"
        );
    }
}

//! Configuration file loader for aikit.
//!
//! Reads a TOML file (conventionally `aikit.toml`) and deserializes it into
//! [`ToolkitConfig`]. Unlike provider resolution, loading never consults the
//! process environment; pass [`env_lookup`] to
//! [`ProviderSettings::resolve`](aikit_types::config::ProviderSettings::resolve)
//! when environment fallback for API keys is wanted.

use std::path::Path;

use aikit_types::config::ToolkitConfig;
use aikit_types::error::ConfigError;

/// Load configuration from `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if it is not a valid configuration.
pub async fn load_config(path: &Path) -> Result<ToolkitConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;

    let config = toml::from_str::<ToolkitConfig>(&content)
        .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;

    tracing::debug!(
        path = %path.display(),
        kind = %config.provider.kind,
        "loaded configuration"
    );
    Ok(config)
}

/// Read a variable from the process environment, treating blank values as unset.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aikit_types::llm::{Backend, ProviderKind, ProviderSelection};
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_reads_provider_and_telemetry() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("aikit.toml");
        tokio::fs::write(
            &path,
            r#"
[provider]
kind = "groq"
model = "llama-3.1-8b-instant"
api_key = "gsk-test"

[telemetry]
otel_stdout = true
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path).await.unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Groq);
        assert!(config.telemetry.otel_stdout);

        let selection = config.provider.resolve(|_| None).unwrap();
        assert_eq!(selection.kind(), ProviderKind::Groq);
        assert_eq!(selection.model(), "llama-3.1-8b-instant");
    }

    #[tokio::test]
    async fn load_config_gateway_uses_lookup_for_key() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("aikit.toml");
        tokio::fs::write(
            &path,
            r#"
[provider]
kind = "vercel"

[provider.gateway]
family = "anthropic"
model = "claude-sonnet-4-20250514"
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path).await.unwrap();
        assert!(!config.telemetry.otel_stdout);

        let selection = config
            .provider
            .resolve(|name| (name == "ANTHROPIC_API_KEY").then(|| "sk-ant".to_string()))
            .unwrap();
        assert!(matches!(
            selection,
            ProviderSelection::Gateway { family: Backend::Anthropic, .. }
        ));
    }

    #[tokio::test]
    async fn load_config_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(&tmp.path().join("missing.toml")).await.unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[tokio::test]
    async fn load_config_invalid_toml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("aikit.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let err = load_config(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[tokio::test]
    async fn load_config_unknown_kind_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("aikit.toml");
        tokio::fs::write(&path, "[provider]\nkind = \"mistral\"\n")
            .await
            .unwrap();

        let err = load_config(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

use thiserror::Error;

use crate::llm::ProviderKind;

/// Errors from loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("model name is required for '{provider}' provider")]
    MissingModel { provider: ProviderKind },

    #[error("gateway model config is required for 'vercel' provider")]
    MissingGatewayModel,

    #[error("base_url is not supported for 'vercel' provider")]
    GatewayBaseUrl,

    #[error("API key is required for '{provider}' provider")]
    MissingApiKey { provider: ProviderKind },

    #[error("failed to read config file: {0}")]
    Io(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),
}

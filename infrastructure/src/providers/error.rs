//! Errors raised while building a model invoker from configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Unknown provider '{0}' (expected 'gemini' or 'openai')")]
    UnknownProvider(String),

    #[error("No API key for {provider}: set ${env_var} or providers.{provider}.api_key")]
    MissingApiKey {
        provider: &'static str,
        env_var: String,
    },

    #[error("Invalid base URL '{url}' for {provider}: {reason}")]
    InvalidBaseUrl {
        provider: &'static str,
        url: String,
        reason: String,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

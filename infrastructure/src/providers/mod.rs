//! Model service adapters.
//!
//! Each adapter implements [`ModelInvoker`] over HTTP:
//!
//! - [`GeminiInvoker`]: Google Gemini `generateContent`
//! - [`OpenAiInvoker`]: OpenAI-compatible `/chat/completions`
//!
//! [`build_invoker`] picks one from a loaded [`FileConfig`].

pub mod error;
pub mod gemini;
mod guidance;
pub mod http;
pub mod openai;

pub use error::ProviderError;
pub use gemini::GeminiInvoker;
pub use http::build_http_client;
pub use openai::OpenAiInvoker;

use crate::config::{FileConfig, FileModelConfig, resolve_api_key};
use reqwest::Client;
use scholar_application::ModelInvoker;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Supported model services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Gemini, ProviderKind::OpenAi];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Model used when `model.name` is not configured
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-2.0-flash",
            ProviderKind::OpenAi => "gpt-4o-mini",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            _ => Err(ProviderError::UnknownProvider(s.to_string())),
        }
    }
}

/// Per-call settings shared by every adapter
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub timeout: Duration,
    pub temperature: Option<f32>,
    pub max_output_tokens: u32,
}

impl ModelSettings {
    pub fn from_config(config: &FileModelConfig, provider: ProviderKind) -> Self {
        Self {
            model: config.model_name(provider),
            timeout: config.timeout(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

/// Build the configured model invoker around a shared HTTP client.
pub fn build_invoker(
    config: &FileConfig,
    client: Client,
) -> Result<Arc<dyn ModelInvoker>, ProviderError> {
    let provider: ProviderKind = config.model.provider.parse()?;
    let settings = ModelSettings::from_config(&config.model, provider);
    info!(
        "Using {} model '{}' (timeout {:?})",
        provider, settings.model, settings.timeout
    );

    match provider {
        ProviderKind::Gemini => {
            let gemini = &config.providers.gemini;
            let api_key = resolve_api_key(gemini.api_key.as_deref(), &gemini.api_key_env)
                .ok_or_else(|| ProviderError::MissingApiKey {
                    provider: "gemini",
                    env_var: gemini.api_key_env.clone(),
                })?;
            Ok(Arc::new(GeminiInvoker::new(
                client,
                api_key,
                &gemini.base_url,
                settings,
            )?))
        }
        ProviderKind::OpenAi => {
            let openai = &config.providers.openai;
            let api_key = resolve_api_key(openai.api_key.as_deref(), &openai.api_key_env)
                .ok_or_else(|| ProviderError::MissingApiKey {
                    provider: "openai",
                    env_var: openai.api_key_env.clone(),
                })?;
            Ok(Arc::new(OpenAiInvoker::new(
                client,
                api_key,
                &openai.base_url,
                settings,
            )?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!("gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!(" OpenAI ".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert!(matches!(
            "claude".parse::<ProviderKind>(),
            Err(ProviderError::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_defaults_match_adapter_constants() {
        let config = FileConfig::default();
        assert_eq!(config.providers.gemini.base_url, gemini::DEFAULT_BASE_URL);
        assert_eq!(config.providers.openai.base_url, openai::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_build_gemini_with_inline_key() {
        let mut config = FileConfig::default();
        config.providers.gemini.api_key = Some("inline".to_string());

        let invoker = build_invoker(&config, Client::new()).unwrap();
        assert_eq!(invoker.describe(), "gemini:gemini-2.0-flash");
    }

    #[test]
    fn test_build_openai_with_model_name() {
        let mut config = FileConfig::default();
        config.model.provider = "openai".to_string();
        config.model.name = Some("gpt-4.1".to_string());
        config.providers.openai.api_key = Some("sk-inline".to_string());

        let invoker = build_invoker(&config, Client::new()).unwrap();
        assert_eq!(invoker.describe(), "openai:gpt-4.1");
    }

    #[test]
    fn test_missing_key_names_env_var() {
        let mut config = FileConfig::default();
        config.providers.gemini.api_key_env = "SCHOLAR_TEST_NO_SUCH_KEY".to_string();

        let err = build_invoker(&config, Client::new()).err().unwrap();
        assert!(err.to_string().contains("SCHOLAR_TEST_NO_SUCH_KEY"));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = FileConfig::default();
        config.providers.gemini.api_key = Some("k".to_string());
        config.providers.gemini.base_url = "::nope".to_string();

        assert!(matches!(
            build_invoker(&config, Client::new()),
            Err(ProviderError::InvalidBaseUrl { .. })
        ));
    }
}

//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// Google Gemini API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Generative Language API.
    pub base_url: String,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

/// OpenAI-compatible API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL, including the version segment (can point at any compatible server).
    pub base_url: String,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub gemini: FileGeminiConfig,
    pub openai: FileOpenAiConfig,
}

/// Resolve an API key: the inline value wins, then the named env var.
pub(crate) fn resolve_api_key(inline: Option<&str>, env_var: &str) -> Option<String> {
    inline
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok())
        .filter(|k| !k.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_key_wins() {
        assert_eq!(
            resolve_api_key(Some("inline"), "SCHOLAR_TEST_UNSET_KEY_VAR"),
            Some("inline".to_string())
        );
    }

    #[test]
    fn test_missing_key() {
        assert_eq!(resolve_api_key(None, "SCHOLAR_TEST_UNSET_KEY_VAR"), None);
        assert_eq!(resolve_api_key(Some("  "), "SCHOLAR_TEST_UNSET_KEY_VAR"), None);
    }

    #[test]
    fn test_deserialize_partial_provider() {
        let config: FileProvidersConfig = toml::from_str(
            r#"
[openai]
base_url = "http://localhost:11434/v1"
"#,
        )
        .unwrap();
        assert_eq!(config.openai.base_url, "http://localhost:11434/v1");
        assert_eq!(config.openai.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.gemini, FileGeminiConfig::default());
    }
}

//! Model configuration from TOML (`[model]` section)

use crate::config::issue::{ConfigIssue, ConfigIssueCode};
use crate::providers::ProviderKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model service: "gemini" or "openai".
    pub provider: String,
    /// Model name; the provider's default when unset.
    pub name: Option<String>,
    /// Upper bound on one model call, in seconds.
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
    pub max_output_tokens: u32,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini.as_str().to_string(),
            name: None,
            timeout_secs: 30,
            temperature: None,
            max_output_tokens: 2048,
        }
    }
}

impl FileModelConfig {
    /// Parse `provider`, reporting an issue when it is unknown.
    pub fn parse_provider(&self) -> (Option<ProviderKind>, Vec<ConfigIssue>) {
        match self.provider.parse::<ProviderKind>() {
            Ok(kind) => (Some(kind), vec![]),
            Err(_) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::UnknownProvider {
                        value: self.provider.clone(),
                        valid_values: ProviderKind::ALL
                            .iter()
                            .map(|k| k.as_str().to_string())
                            .collect(),
                    },
                    format!(
                        "model.provider: unknown provider '{}' (expected 'gemini' or 'openai')",
                        self.provider
                    ),
                )],
            ),
        }
    }

    /// The configured model name, falling back to the provider default.
    pub fn model_name(&self, provider: ProviderKind) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => provider.default_model().to_string(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_provider().1;

        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "model.timeout_secs: must be greater than zero",
            ));
        }

        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName,
                "model.name: must not be empty (remove it to use the provider default)",
            ));
        }

        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::TemperatureOutOfRange { value: t },
                    format!("model.temperature: {} is outside 0.0..=2.0", t),
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileModelConfig::default();
        assert_eq!(config.provider, "gemini");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_output_tokens, 2048);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_model_name_falls_back_to_provider_default() {
        let config = FileModelConfig::default();
        assert_eq!(
            config.model_name(ProviderKind::OpenAi),
            ProviderKind::OpenAi.default_model()
        );

        let config = FileModelConfig {
            name: Some("gemini-1.5-pro".to_string()),
            ..Default::default()
        };
        assert_eq!(config.model_name(ProviderKind::Gemini), "gemini-1.5-pro");
    }

    #[test]
    fn test_unknown_provider() {
        let config = FileModelConfig {
            provider: "claude".to_string(),
            ..Default::default()
        };
        let (kind, issues) = config.parse_provider();
        assert!(kind.is_none());
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::UnknownProvider { value, .. } if value == "claude"
        ));
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let config = FileModelConfig {
            provider: "nope".to_string(),
            name: Some("  ".to_string()),
            timeout_secs: 0,
            temperature: Some(3.5),
            max_output_tokens: 2048,
        };
        let codes: Vec<_> = config.validate().into_iter().map(|i| i.code).collect();
        assert_eq!(codes.len(), 4);
        assert!(codes.contains(&ConfigIssueCode::ZeroTimeout));
        assert!(codes.contains(&ConfigIssueCode::EmptyModelName));
        assert!(codes.contains(&ConfigIssueCode::TemperatureOutOfRange { value: 3.5 }));
    }
}

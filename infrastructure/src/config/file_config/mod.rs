//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing keys take their defaults.

mod model;
mod output;
mod providers;

pub use model::FileModelConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{FileGeminiConfig, FileOpenAiConfig, FileProvidersConfig};
pub(crate) use providers::resolve_api_key;

use super::issue::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Which model to call and how long to wait for it
    pub model: FileModelConfig,
    /// Credentials and endpoints per provider
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks the `[model]` section (provider name, timeout, model name,
    /// temperature range) and warns about API keys written inline.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.model.validate();

        let inline = [
            ("gemini", self.providers.gemini.api_key.is_some()),
            ("openai", self.providers.openai.api_key.is_some()),
        ];
        for (provider, has_inline_key) in inline {
            if has_inline_key {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InlineApiKey {
                        provider: provider.to_string(),
                    },
                    format!(
                        "providers.{}.api_key is set inline; prefer api_key_env",
                        provider
                    ),
                ));
            }
        }

        issues
    }
}

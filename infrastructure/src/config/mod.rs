//! Configuration file loading for scholar-ai
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SCHOLAR_*` environment variables (nested with `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./scholar.toml` or `./.scholar.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/scholar-ai/config.toml`
//! 5. Default values
//!
//! Command-line overrides are applied by the binary on top of the result.

mod file_config;
mod issue;
mod loader;

pub use file_config::{
    FileConfig, FileGeminiConfig, FileModelConfig, FileOpenAiConfig, FileOutputConfig,
    FileOutputFormat, FileProvidersConfig,
};
pub use issue::{ConfigIssue, ConfigIssueCode, Severity, has_errors};
pub use loader::ConfigLoader;
pub(crate) use file_config::resolve_api_key;

//! Infrastructure layer for scholar-ai
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP model invokers for Gemini and
//! OpenAI-compatible services, plus configuration file loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileConfig, FileModelConfig, FileOutputConfig, FileOutputFormat,
    FileProvidersConfig, Severity,
};
pub use providers::{
    GeminiInvoker, ModelSettings, OpenAiInvoker, ProviderError, ProviderKind, build_http_client,
    build_invoker,
};

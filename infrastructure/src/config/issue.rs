//! Configuration issues found by [`FileConfig::validate`](super::FileConfig::validate)

use std::fmt;

/// How serious a configuration issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssueCode {
    /// `model.provider` names a provider that does not exist.
    UnknownProvider { value: String, valid_values: Vec<String> },
    /// `model.timeout_secs` is zero, so every call would time out.
    ZeroTimeout,
    /// `model.name` is set but blank.
    EmptyModelName,
    /// `model.temperature` is outside `0.0..=2.0`.
    TemperatureOutOfRange { value: f32 },
    /// `api_key` is written into a config file.
    InlineApiKey { provider: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

/// Whether any of `issues` is fatal
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

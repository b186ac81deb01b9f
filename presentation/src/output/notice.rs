//! User-facing notices for failed flows.
//!
//! Each [`FlowErrorKind`] gets its own wording and exit code so the user
//! knows whether to fix the input, try again later, or just rerun.

use colored::Colorize;
use scholar_application::{FlowError, FlowErrorKind};
use scholar_domain::{ASK_QUESTION_FLOW, FIND_BOOKS_FLOW};

/// Exit code for a rejected request
pub const EXIT_INVALID_REQUEST: u8 = 2;
/// Exit code when the model could not be reached or timed out
pub const EXIT_MODEL_UNAVAILABLE: u8 = 3;
/// Exit code when the model's answer did not have the expected shape
pub const EXIT_MALFORMED_RESPONSE: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub kind: FlowErrorKind,
    pub headline: String,
    pub hint: String,
    pub details: Vec<String>,
}

impl ErrorNotice {
    pub fn from_error(error: &FlowError) -> Self {
        let kind = error.kind();
        let headline = match error.flow() {
            ASK_QUESTION_FLOW => "Could not get an answer from the AI.",
            FIND_BOOKS_FLOW => "Could not fetch book recommendations.",
            _ => "The request failed.",
        }
        .to_string();

        let (hint, details) = match error {
            FlowError::InvalidRequest { violations, .. } => (
                "Please rephrase your request:".to_string(),
                violations.iter().map(|v| v.to_string()).collect(),
            ),
            FlowError::ModelUnavailable { source, .. } => (
                "The AI service is unavailable right now. Please try again.".to_string(),
                vec![source.to_string()],
            ),
            FlowError::MalformedResponse { source, .. } => (
                "The AI returned an unexpected answer. Please try again.".to_string(),
                match source.violations() {
                    Some(violations) => violations.iter().map(|v| v.to_string()).collect(),
                    None => vec![source.to_string()],
                },
            ),
        };

        Self {
            kind,
            headline,
            hint,
            details,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.kind {
            FlowErrorKind::InvalidRequest => EXIT_INVALID_REQUEST,
            FlowErrorKind::ModelUnavailable => EXIT_MODEL_UNAVAILABLE,
            FlowErrorKind::MalformedResponse => EXIT_MALFORMED_RESPONSE,
        }
    }

    /// Render for stderr
    pub fn render(&self) -> String {
        let mut output = format!("{} {}\n", "Error:".red().bold(), self.headline);
        let hint = match self.kind {
            FlowErrorKind::InvalidRequest => self.hint.yellow(),
            _ => self.hint.normal(),
        };
        output.push_str(&format!("{}\n", hint));
        for detail in &self.details {
            output.push_str(&format!("  {} {}\n", "-".dimmed(), detail));
        }
        output
    }
}

//! Validation violations

use std::fmt;
use thiserror::Error;

/// What is wrong with a single field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    #[error("is required")]
    Missing,

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("must contain at least {min} items (got {actual})")]
    TooFewItems { min: usize, actual: usize },

    #[error("must contain at most {max} items (got {actual})")]
    TooManyItems { max: usize, actual: usize },

    #[error("'{value}' is not a well-formed URL")]
    InvalidUrl { value: String },

    #[error("'{value}' is not one of: {}", allowed.join(", "))]
    NotInEnum { value: String, allowed: Vec<String> },

    #[error("cannot be represented as structured data: {0}")]
    Unrepresentable(String),
}

/// A violation located at a path inside the validated value.
///
/// Paths use dotted field names with bracketed array indices
/// (`books[2].coverImageUrl`); `$` denotes the value itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(path: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Top-level field name the violation belongs to
    pub fn field(&self) -> &str {
        let end = self
            .path
            .find(['.', '['])
            .unwrap_or(self.path.len());
        &self.path[..end]
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Every violation found in one validation pass (never empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self(violations)
    }

    pub fn single(path: impl Into<String>, kind: ViolationKind) -> Self {
        Self(vec![Violation::new(path, kind)])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any violation is located at or under `path`
    pub fn touches(&self, path: &str) -> bool {
        self.0
            .iter()
            .any(|v| v.path == path || v.field() == path)
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        let v = Violation::new("question", ViolationKind::TooShort { min: 10, actual: 4 });
        assert_eq!(
            v.to_string(),
            "question: must be at least 10 characters (got 4)"
        );
    }

    #[test]
    fn test_field_of_nested_path() {
        let v = Violation::new(
            "books[2].coverImageUrl",
            ViolationKind::InvalidUrl {
                value: "not a url".to_string(),
            },
        );
        assert_eq!(v.field(), "books");
        assert_eq!(Violation::new("$", ViolationKind::Missing).field(), "$");
    }

    #[test]
    fn test_violations_display_joins_all() {
        let violations = Violations::new(vec![
            Violation::new("subject", ViolationKind::Missing),
            Violation::new("question", ViolationKind::Missing),
        ]);
        assert_eq!(
            violations.to_string(),
            "subject: is required; question: is required"
        );
        assert!(violations.touches("question"));
        assert!(!violations.touches("answer"));
    }

    #[test]
    fn test_enum_message_lists_allowed_values() {
        let kind = ViolationKind::NotInEnum {
            value: "Art".to_string(),
            allowed: vec!["History".to_string(), "Science".to_string()],
        };
        assert_eq!(kind.to_string(), "'Art' is not one of: History, Science");
    }
}

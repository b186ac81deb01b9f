//! Schema registry
//!
//! Declarative descriptions of request and response shapes. A [`Schema`]
//! validates a [`serde_json::Value`] and reports every offending field in a
//! single pass rather than stopping at the first one.
//!
//! ```
//! use scholar_domain::schema::{FieldSpec, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::define(
//!     "AskQuestionRequest",
//!     vec![
//!         FieldSpec::string("subject", "The subject of the question.").with_min_length(1),
//!         FieldSpec::string("question", "The question to be answered.").with_length(10, 500),
//!     ],
//! );
//!
//! let violations = schema
//!     .validate(&json!({"subject": "Mathematics", "question": "Why?"}))
//!     .unwrap_err();
//! assert!(violations.touches("question"));
//! ```

mod field;
mod json_schema;
mod violation;

pub use field::{FieldKind, FieldSpec};
pub use violation::{Violation, ViolationKind, Violations};

use serde_json::{Map, Value};
use url::Url;

/// Path used for violations on the validated value itself
pub const ROOT_PATH: &str = "$";

/// A named set of field descriptors for a JSON object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Define a schema from its fields. Field order is preserved in hints.
    pub fn define(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Validate `value` against this schema.
    ///
    /// On success returns the value restricted to declared fields, so
    /// validating the output again returns it unchanged. On failure returns
    /// every violation found.
    pub fn validate(&self, value: &Value) -> Result<Value, Violations> {
        let mut violations = Vec::new();
        let checked = check_object(&self.fields, value, "", &mut violations);

        match checked {
            Some(value) if violations.is_empty() => Ok(value),
            _ => Err(Violations::new(violations)),
        }
    }
}

fn check_object(
    fields: &[FieldSpec],
    value: &Value,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<Value> {
    let Some(map) = value.as_object() else {
        violations.push(Violation::new(
            display_path(path),
            ViolationKind::WrongType {
                expected: "object",
                found: json_type_name(value),
            },
        ));
        return None;
    };

    let mut out = Map::new();
    for field in fields {
        let field_path = join_path(path, &field.name);
        match map.get(&field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    violations.push(Violation::new(field_path, ViolationKind::Missing));
                }
            }
            Some(found) => {
                if let Some(checked) =
                    check_value(&field.kind, Some(field), found, &field_path, violations)
                {
                    out.insert(field.name.clone(), checked);
                }
            }
        }
    }

    Some(Value::Object(out))
}

/// Check one value against a kind. `spec` carries length/emptiness
/// constraints and is `None` for array items.
fn check_value(
    kind: &FieldKind,
    spec: Option<&FieldSpec>,
    value: &Value,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<Value> {
    match kind {
        FieldKind::String => {
            let s = expect_str(value, path, violations)?;
            check_length(spec, s, path, violations);
            Some(value.clone())
        }
        FieldKind::Url => {
            let s = expect_str(value, path, violations)?;
            let empty_ok = s.is_empty() && spec.is_some_and(|f| f.allow_empty);
            if !empty_ok && !is_well_formed_url(s) {
                violations.push(Violation::new(
                    path,
                    ViolationKind::InvalidUrl {
                        value: s.to_string(),
                    },
                ));
            }
            check_length(spec, s, path, violations);
            Some(value.clone())
        }
        FieldKind::Number => {
            if value.is_number() {
                Some(value.clone())
            } else {
                violations.push(Violation::new(
                    path,
                    ViolationKind::WrongType {
                        expected: "number",
                        found: json_type_name(value),
                    },
                ));
                None
            }
        }
        FieldKind::Enum(allowed) => {
            let s = expect_str(value, path, violations)?;
            if !allowed.iter().any(|a| a == s) {
                violations.push(Violation::new(
                    path,
                    ViolationKind::NotInEnum {
                        value: s.to_string(),
                        allowed: allowed.clone(),
                    },
                ));
            }
            Some(value.clone())
        }
        FieldKind::Array(item_kind) => {
            let Some(items) = value.as_array() else {
                violations.push(Violation::new(
                    path,
                    ViolationKind::WrongType {
                        expected: "array",
                        found: json_type_name(value),
                    },
                ));
                return None;
            };
            check_item_count(spec, items.len(), path, violations);

            let checked = items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| {
                    let item_path = format!("{}[{}]", path, i);
                    check_value(item_kind, None, item, &item_path, violations)
                })
                .collect();
            Some(Value::Array(checked))
        }
        FieldKind::Object(schema) => check_object(&schema.fields, value, path, violations),
    }
}

fn expect_str<'v>(value: &'v Value, path: &str, violations: &mut Vec<Violation>) -> Option<&'v str> {
    match value.as_str() {
        Some(s) => Some(s),
        None => {
            violations.push(Violation::new(
                path,
                ViolationKind::WrongType {
                    expected: "string",
                    found: json_type_name(value),
                },
            ));
            None
        }
    }
}

fn check_length(spec: Option<&FieldSpec>, s: &str, path: &str, violations: &mut Vec<Violation>) {
    let Some(spec) = spec else { return };
    let actual = s.chars().count();

    if let Some(min) = spec.min_length {
        if actual < min {
            violations.push(Violation::new(path, ViolationKind::TooShort { min, actual }));
        }
    }
    if let Some(max) = spec.max_length {
        if actual > max {
            violations.push(Violation::new(path, ViolationKind::TooLong { max, actual }));
        }
    }
}

fn check_item_count(
    spec: Option<&FieldSpec>,
    actual: usize,
    path: &str,
    violations: &mut Vec<Violation>,
) {
    let Some(spec) = spec else { return };

    if let Some(min) = spec.min_length {
        if actual < min {
            violations.push(Violation::new(path, ViolationKind::TooFewItems { min, actual }));
        }
    }
    if let Some(max) = spec.max_length {
        if actual > max {
            violations.push(Violation::new(path, ViolationKind::TooManyItems { max, actual }));
        }
    }
}

/// An absolute URL with a host (`https://example.com/x`, not `not a url`
/// or `mailto:someone`).
pub fn is_well_formed_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| url.has_host())
}

/// JSON type name of a value, as used in violation messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { ROOT_PATH } else { path }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book_schema() -> Schema {
        Schema::define(
            "Book",
            vec![
                FieldSpec::string("title", "The title of the book."),
                FieldSpec::url("coverImageUrl", "URL of the book cover image.").allow_empty(),
                FieldSpec::url("url", "URL where the book can be found."),
            ],
        )
    }

    fn books_schema() -> Schema {
        Schema::define(
            "FindBooksResponse",
            vec![FieldSpec::array(
                "books",
                "A list of relevant books.",
                FieldKind::Object(book_schema()),
            )],
        )
    }

    fn question_schema() -> Schema {
        Schema::define(
            "AskQuestionRequest",
            vec![
                FieldSpec::string("subject", "The subject of the question.").with_min_length(1),
                FieldSpec::string("question", "The question to be answered.").with_length(10, 500),
            ],
        )
    }

    #[test]
    fn test_valid_value_passes() {
        let value = json!({"subject": "Mathematics", "question": "What is a prime number?"});
        assert_eq!(question_schema().validate(&value).unwrap(), value);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let value = json!({
            "subject": "History",
            "question": "Why did the Roman Empire fall?",
            "extra": true
        });
        let schema = question_schema();
        let once = schema.validate(&value).unwrap();
        let twice = schema.validate(&once).unwrap();
        assert_eq!(once, twice);
        assert!(once.get("extra").is_none());
    }

    #[test]
    fn test_violations_are_accumulated() {
        let violations = question_schema()
            .validate(&json!({"question": 42}))
            .unwrap_err();

        assert_eq!(violations.len(), 2);
        assert!(violations.touches("subject"));
        assert!(violations.touches("question"));
    }

    #[test]
    fn test_question_length_bounds() {
        let schema = question_schema();

        let short = schema
            .validate(&json!({"subject": "Mathematics", "question": "Why?"}))
            .unwrap_err()
            .into_vec();
        assert_eq!(
            short,
            vec![Violation::new(
                "question",
                ViolationKind::TooShort { min: 10, actual: 4 }
            )]
        );

        let long = "x".repeat(501);
        let violations = schema
            .validate(&json!({"subject": "Mathematics", "question": long}))
            .unwrap_err()
            .into_vec();
        assert_eq!(
            violations[0].kind,
            ViolationKind::TooLong {
                max: 500,
                actual: 501
            }
        );

        // Bounds are inclusive and count characters, not bytes
        let ten = "é".repeat(10);
        assert!(schema
            .validate(&json!({"subject": "French", "question": ten}))
            .is_ok());
    }

    #[test]
    fn test_null_counts_as_missing() {
        let violations = question_schema()
            .validate(&json!({"subject": null, "question": "What is a prime number?"}))
            .unwrap_err()
            .into_vec();
        assert_eq!(violations, vec![Violation::new("subject", ViolationKind::Missing)]);
    }

    #[test]
    fn test_root_must_be_object() {
        let violations = question_schema().validate(&json!(["a"])).unwrap_err().into_vec();
        assert_eq!(violations[0].path, ROOT_PATH);
        assert_eq!(
            violations[0].kind,
            ViolationKind::WrongType {
                expected: "object",
                found: "array"
            }
        );
    }

    #[test]
    fn test_nested_url_violation_has_indexed_path() {
        let value = json!({
            "books": [
                {"title": "A", "coverImageUrl": "https://covers.example.com/a.png", "url": "https://example.com/a"},
                {"title": "B", "coverImageUrl": "not a url", "url": "https://example.com/b"}
            ]
        });
        let violations = books_schema().validate(&value).unwrap_err().into_vec();
        assert_eq!(
            violations,
            vec![Violation::new(
                "books[1].coverImageUrl",
                ViolationKind::InvalidUrl {
                    value: "not a url".to_string()
                }
            )]
        );
    }

    #[test]
    fn test_empty_url_only_where_allowed() {
        let value = json!({
            "books": [{"title": "A", "coverImageUrl": "", "url": ""}]
        });
        let violations = books_schema().validate(&value).unwrap_err().into_vec();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "books[0].url");
    }

    #[test]
    fn test_enum_membership() {
        let schema = Schema::define(
            "Level",
            vec![FieldSpec::enumeration(
                "level",
                "Grade level",
                ["High School", "Undergraduate"],
            )],
        );
        assert!(schema.validate(&json!({"level": "Undergraduate"})).is_ok());
        let violations = schema.validate(&json!({"level": "Kindergarten"})).unwrap_err();
        assert!(matches!(
            violations.into_vec()[0].kind,
            ViolationKind::NotInEnum { .. }
        ));
    }

    #[test]
    fn test_number_and_optional_fields() {
        let schema = Schema::define(
            "Rating",
            vec![
                FieldSpec::number("score", "Score"),
                FieldSpec::string("note", "Note").optional(),
            ],
        );
        assert!(schema.validate(&json!({"score": 4.5})).is_ok());
        let violations = schema.validate(&json!({"score": "high"})).unwrap_err();
        assert!(violations.touches("score"));
    }

    #[test]
    fn test_well_formed_url() {
        assert!(is_well_formed_url("https://books.google.com/books?id=1"));
        assert!(!is_well_formed_url("not a url"));
        assert!(!is_well_formed_url(""));
        assert!(!is_well_formed_url("/relative/path"));
        assert!(!is_well_formed_url("mailto:someone@example.com"));
    }
}

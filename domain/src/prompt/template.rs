//! Compiled prompt templates
//!
//! Template text uses `{{{field}}}` placeholders (`{{field}}` is accepted as
//! an equivalent spelling). Output goes to a model, not a browser, so values
//! are inserted verbatim without escaping.

use crate::schema::Schema;
use serde_json::Value;
use thiserror::Error;

/// Errors from compiling or rendering a template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template '{template}': placeholder '{placeholder}' is not a field of {schema}")]
    UnknownPlaceholder {
        template: String,
        placeholder: String,
        schema: String,
    },

    #[error("template '{template}': unterminated placeholder at byte {offset}")]
    Unterminated { template: String, offset: usize },

    #[error("template '{template}': empty placeholder at byte {offset}")]
    EmptyPlaceholder { template: String, offset: usize },

    #[error("template '{template}': no value for field '{field}'")]
    MissingField { template: String, field: String },

    #[error("template '{template}': request value must be a JSON object")]
    NotAnObject { template: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// A template checked against its request schema at compile time.
///
/// Every placeholder is known to name a field of the bound schema, so
/// rendering can only fail when the value lacks that field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    name: String,
    source: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse `source` and bind its placeholders to `schema`.
    pub fn compile(
        name: impl Into<String>,
        source: impl Into<String>,
        schema: &Schema,
    ) -> Result<Self, TemplateError> {
        let name = name.into();
        let source = source.into();
        let segments = parse_segments(&name, &source)?;

        for segment in &segments {
            if let Segment::Field(field) = segment {
                if schema.field(field).is_none() {
                    return Err(TemplateError::UnknownPlaceholder {
                        template: name,
                        placeholder: field.clone(),
                        schema: schema.name().to_string(),
                    });
                }
            }
        }

        Ok(Self {
            name,
            source,
            segments,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The template text as written
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Field names referenced by the template, in order of first use
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Field(field) = segment {
                if !names.contains(&field.as_str()) {
                    names.push(field);
                }
            }
        }
        names
    }

    /// Substitute every placeholder with the matching field of `request`.
    ///
    /// Strings are inserted as-is, numbers and booleans in their JSON text
    /// form, arrays and objects as compact JSON. `null` counts as missing.
    pub fn render(&self, request: &Value) -> Result<String, TemplateError> {
        let Some(fields) = request.as_object() else {
            return Err(TemplateError::NotAnObject {
                template: self.name.clone(),
            });
        };

        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => match fields.get(field) {
                    None | Some(Value::Null) => {
                        return Err(TemplateError::MissingField {
                            template: self.name.clone(),
                            field: field.clone(),
                        });
                    }
                    Some(Value::String(s)) => out.push_str(s),
                    Some(other) => out.push_str(&other.to_string()),
                },
            }
        }

        Ok(out)
    }
}

fn parse_segments(name: &str, source: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut rest = source;
    let mut offset = 0;

    while let Some(start) = rest.find("{{") {
        if start > 0 {
            segments.push(Segment::Literal(rest[..start].to_string()));
        }

        let after_open = &rest[start..];
        let (open_len, close) = if after_open.starts_with("{{{") {
            (3, "}}}")
        } else {
            (2, "}}")
        };

        let inner_start = start + open_len;
        let Some(inner_len) = rest[inner_start..].find(close) else {
            return Err(TemplateError::Unterminated {
                template: name.to_string(),
                offset: offset + start,
            });
        };

        let field = rest[inner_start..inner_start + inner_len].trim();
        if field.is_empty() {
            return Err(TemplateError::EmptyPlaceholder {
                template: name.to_string(),
                offset: offset + start,
            });
        }
        segments.push(Segment::Field(field.to_string()));

        let consumed = inner_start + inner_len + close.len();
        offset += consumed;
        rest = &rest[consumed..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }

    Ok(segments)
}

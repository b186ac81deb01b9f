//! Field descriptors

use super::Schema;

/// The type a field's value must have
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Any JSON string
    String,
    /// A string holding an absolute URL with a host
    Url,
    /// Any JSON number
    Number,
    /// A string drawn from a fixed set of values
    Enum(Vec<String>),
    /// A JSON array whose items all have the given kind
    Array(Box<FieldKind>),
    /// A nested JSON object described by its own schema
    Object(Schema),
}

impl FieldKind {
    /// Short type name used in violation messages and schema hints
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String | FieldKind::Url | FieldKind::Enum(_) => "string",
            FieldKind::Number => "number",
            FieldKind::Array(_) => "array",
            FieldKind::Object(_) => "object",
        }
    }
}

/// A named field and the constraints its value must meet.
///
/// Fields are required unless [`optional`](Self::optional) is called.
/// For strings and URLs `min_length`/`max_length` bound the number of
/// characters; for arrays they bound the number of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub description: String,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// URL fields only: accept `""` as "no URL" instead of rejecting it.
    pub allow_empty: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
            min_length: None,
            max_length: None,
            allow_empty: false,
        }
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String, description)
    }

    pub fn url(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Url, description)
    }

    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number, description)
    }

    pub fn enumeration<I, S>(name: impl Into<String>, description: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(name, FieldKind::Enum(values), description)
    }

    pub fn array(name: impl Into<String>, description: impl Into<String>, item: FieldKind) -> Self {
        Self::new(name, FieldKind::Array(Box::new(item)), description)
    }

    pub fn object(name: impl Into<String>, description: impl Into<String>, schema: Schema) -> Self {
        Self::new(name, FieldKind::Object(schema), description)
    }

    // ==================== Builder Methods ====================

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

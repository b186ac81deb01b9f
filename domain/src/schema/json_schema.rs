//! JSON Schema rendering of a [`Schema`].
//!
//! The rendered document is sent to the model as shape guidance. It is only a
//! hint: replies are always re-validated with [`Schema::validate`].

use super::{FieldKind, FieldSpec, Schema};
use serde_json::{Map, Value, json};

impl Schema {
    /// Render this schema as a JSON Schema object.
    ///
    /// Maps kinds as follows:
    /// - `String` → `"string"`
    /// - `Url` → `"string"` with `"format": "uri"`
    /// - `Number` → `"number"`
    /// - `Enum` → `"string"` with `"enum"`
    /// - `Array` → `"array"` with `"items"`
    /// - `Object` → nested `"object"`
    pub fn to_json_schema(&self) -> Value {
        object_schema(&self.fields)
    }
}

fn object_schema(fields: &[FieldSpec]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in fields {
        properties.insert(field.name.clone(), field_schema(field));
        if field.required {
            required.push(json!(field.name));
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn field_schema(field: &FieldSpec) -> Value {
    let mut schema = match kind_schema(&field.kind) {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    if !field.description.is_empty() {
        schema.insert("description".to_string(), json!(field.description));
    }

    let (min_key, max_key) = match field.kind {
        FieldKind::Array(_) => ("minItems", "maxItems"),
        _ => ("minLength", "maxLength"),
    };
    if let Some(min) = field.min_length {
        schema.insert(min_key.to_string(), json!(min));
    }
    if let Some(max) = field.max_length {
        schema.insert(max_key.to_string(), json!(max));
    }

    Value::Object(schema)
}

fn kind_schema(kind: &FieldKind) -> Value {
    match kind {
        FieldKind::String => json!({"type": "string"}),
        FieldKind::Url => json!({"type": "string", "format": "uri"}),
        FieldKind::Number => json!({"type": "number"}),
        FieldKind::Enum(values) => json!({"type": "string", "enum": values}),
        FieldKind::Array(item) => json!({"type": "array", "items": kind_schema(item)}),
        FieldKind::Object(schema) => object_schema(schema.fields()),
    }
}

//! Shape guidance appended to every prompt.
//!
//! Only a hint: whatever comes back is still parsed and validated.

use scholar_domain::Schema;

pub(crate) fn with_shape_guidance(prompt: &str, schema: &Schema) -> String {
    format!(
        "{}\n\nRespond with a single JSON object and nothing else. \
         It must conform to this JSON Schema:\n{:#}\n",
        prompt.trim_end(),
        schema.to_json_schema()
    )
}

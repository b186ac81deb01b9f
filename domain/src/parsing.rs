//! Structured decoding of model output.
//!
//! Locates a JSON payload inside free-form model text and validates it
//! against a response [`Schema`]. Two failure points are kept apart:
//! text with no decodable payload ([`ResponseError::Unparsable`]) and a
//! payload that breaks the schema ([`ResponseError::SchemaViolation`]).
//! Nothing partial is ever returned.

use crate::schema::{Schema, Violations};
use crate::text::preview;
use serde_json::Value;
use thiserror::Error;

const PREVIEW_CHARS: usize = 120;

/// The model output holds no decodable JSON object or array
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("model output is empty")]
    Empty,

    #[error("no JSON payload found in model output: {preview}")]
    NoPayload { preview: String },
}

/// Why a model reply was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("unparsable model output: {0}")]
    Unparsable(#[from] ParseError),

    #[error("model output violates the response schema: {0}")]
    SchemaViolation(Violations),

    #[error("validated output could not be decoded: {0}")]
    Decode(String),
}

impl ResponseError {
    pub fn is_unparsable(&self) -> bool {
        matches!(self, ResponseError::Unparsable(_))
    }

    pub fn violations(&self) -> Option<&Violations> {
        match self {
            ResponseError::SchemaViolation(violations) => Some(violations),
            _ => None,
        }
    }
}

/// Decode `raw` and validate it against `schema`.
pub fn parse_response(raw: &str, schema: &Schema) -> Result<Value, ResponseError> {
    let payload = extract_json_payload(raw)?;
    schema
        .validate(&payload)
        .map_err(ResponseError::SchemaViolation)
}

/// Locate a JSON object or array in model output.
///
/// Tried in order:
/// 1. The whole (trimmed) text
/// 2. Fenced code blocks (` ```json ` or bare ` ``` `)
/// 3. The first balanced `{...}` span that decodes, then `[...]`
///
/// Bare scalars (`42`, `"text"`) are not accepted as payloads.
pub fn extract_json_payload(raw: &str) -> Result<Value, ParseError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    if let Some(value) = decode_structured(text) {
        return Ok(value);
    }

    for block in fenced_blocks(text) {
        if let Some(value) = decode_structured(&block) {
            return Ok(value);
        }
    }

    // Objects first: prose often contains bracketed asides like "[1]".
    for opener in ['{', '['] {
        for (start, _) in text.match_indices(opener) {
            if let Some(value) = balanced_span(text, start).and_then(decode_structured) {
                return Ok(value);
            }
        }
    }

    Err(ParseError::NoPayload {
        preview: preview(text, PREVIEW_CHARS),
    })
}

fn decode_structured(text: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(value) if value.is_object() || value.is_array() => Some(value),
        _ => None,
    }
}

fn fenced_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        match current.as_mut() {
            None if trimmed.starts_with("```") => current = Some(String::new()),
            None => {}
            Some(_) if trimmed == "```" => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
            Some(block) => {
                block.push_str(line);
                block.push('\n');
            }
        }
    }

    blocks
}

/// The bracketed span starting at `start`, tracking string literals so
/// brackets inside strings do not count.
fn balanced_span(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in text.as_bytes().iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

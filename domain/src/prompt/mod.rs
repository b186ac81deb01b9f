//! Prompt domain
//!
//! Compiled prompt templates whose placeholders are bound to request schema
//! fields.

mod template;

pub use template::{PromptTemplate, TemplateError};

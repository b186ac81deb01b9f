//! Domain layer for scholar-ai
//!
//! This crate contains the structured prompt-execution pipeline's pure
//! parts. It performs no I/O and has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Schema
//!
//! A declarative description of a value's required shape. Requests are
//! validated against a schema before anything is sent to a model, and the
//! model's answer is validated against another before it is handed back.
//!
//! ## Flow
//!
//! A named, schema-bound operation: request schema, response schema and a
//! compiled prompt template. Two flows exist:
//!
//! - **ask_question**: answer a free-form question on a subject
//! - **find_books**: recommend books for a subject

pub mod flow;
pub mod parsing;
pub mod prompt;
pub mod schema;
pub mod study;
pub mod text;

// Re-export commonly used types
pub use flow::{ASK_QUESTION_FLOW, FIND_BOOKS_FLOW, Flow, FlowCatalog};
pub use parsing::{ParseError, ResponseError, extract_json_payload, parse_response};
pub use prompt::{PromptTemplate, TemplateError};
pub use schema::{FieldKind, FieldSpec, Schema, Violation, ViolationKind, Violations};
pub use study::{
    AskQuestionRequest, AskQuestionResponse, Book, FindBooksRequest, FindBooksResponse,
    PLACEHOLDER_COVER_URL, SUGGESTED_SUBJECTS,
};

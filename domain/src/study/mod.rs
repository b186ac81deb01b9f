//! Study domain
//!
//! Typed requests and responses of the two study flows, and the schemas
//! they are validated against.

mod models;
pub mod schemas;

pub use models::{
    AskQuestionRequest, AskQuestionResponse, Book, FindBooksRequest, FindBooksResponse,
    PLACEHOLDER_COVER_URL,
};

/// Subjects offered as suggestions when asking a question
pub const SUGGESTED_SUBJECTS: &[&str] = &[
    "General Knowledge",
    "Mathematics",
    "History",
    "Science",
    "Literature",
    "Computer Science",
];

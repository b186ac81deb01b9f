//! Study request/response value objects

use serde::{Deserialize, Serialize};

/// Cover shown for a book whose cover URL came back empty
pub const PLACEHOLDER_COVER_URL: &str = "https://placehold.co/300x400.png";

/// A question about a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskQuestionRequest {
    pub subject: String,
    pub question: String,
}

impl AskQuestionRequest {
    pub fn new(subject: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            question: question.into(),
        }
    }
}

/// The model's answer with its explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskQuestionResponse {
    pub answer: String,
    pub explanation: String,
}

/// A request for book recommendations on a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindBooksRequest {
    pub subject: String,
}

impl FindBooksRequest {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindBooksResponse {
    pub books: Vec<Book>,
}

/// A recommended book. Field names follow the wire format (`coverImageUrl`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub title: String,
    pub author: String,
    pub description: String,
    pub cover_image_url: String,
    pub url: String,
}

impl Book {
    /// The cover URL, or [`PLACEHOLDER_COVER_URL`] when the model left it empty
    pub fn cover_or_placeholder(&self) -> &str {
        if self.cover_image_url.is_empty() {
            PLACEHOLDER_COVER_URL
        } else {
            &self.cover_image_url
        }
    }
}

//! Request and response schemas of the study flows

use crate::schema::{FieldKind, FieldSpec, Schema};

pub const QUESTION_MIN_CHARS: usize = 10;
pub const QUESTION_MAX_CHARS: usize = 500;

pub fn ask_question_request() -> Schema {
    Schema::define(
        "AskQuestionRequest",
        vec![
            FieldSpec::string("subject", "The subject of the question.").with_min_length(1),
            FieldSpec::string("question", "The question to be answered.")
                .with_length(QUESTION_MIN_CHARS, QUESTION_MAX_CHARS),
        ],
    )
}

pub fn ask_question_response() -> Schema {
    Schema::define(
        "AskQuestionResponse",
        vec![
            FieldSpec::string("answer", "The answer to the question."),
            FieldSpec::string("explanation", "A detailed explanation of the answer."),
        ],
    )
}

pub fn find_books_request() -> Schema {
    Schema::define(
        "FindBooksRequest",
        vec![FieldSpec::string("subject", "The subject to search for books about.").with_min_length(1)],
    )
}

pub fn book() -> Schema {
    Schema::define(
        "Book",
        vec![
            FieldSpec::string("title", "The title of the book."),
            FieldSpec::string("author", "The author of the book."),
            FieldSpec::string("description", "A short description of the book."),
            // An empty cover is tolerated and replaced by a placeholder on display.
            FieldSpec::url("coverImageUrl", "URL of the book cover image.").allow_empty(),
            FieldSpec::url("url", "URL where the book can be found or purchased."),
        ],
    )
}

pub fn find_books_response() -> Schema {
    Schema::define(
        "FindBooksResponse",
        vec![FieldSpec::array(
            "books",
            "A list of relevant books.",
            FieldKind::Object(book()),
        )],
    )
}

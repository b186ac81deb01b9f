//! Console output formatter for study results

use colored::Colorize;
use scholar_domain::{AskQuestionResponse, FindBooksResponse, FlowCatalog};
use serde::Serialize;

/// Formats flow results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an answer with its explanation
    pub fn format_answer(subject: &str, question: &str, response: &AskQuestionResponse) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(subject));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Q:".cyan().bold(), question));

        output.push_str(&Self::section_header("Answer"));
        output.push_str(&Self::indent(response.answer.trim(), "  "));
        output.push('\n');

        output.push_str(&Self::section_header("Explanation"));
        output.push_str(&Self::indent(response.explanation.trim(), "  "));
        output.push('\n');

        output.push_str(&Self::footer());
        output
    }

    /// Format a list of book recommendations
    pub fn format_books(subject: &str, response: &FindBooksResponse) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Books on {}", subject)));
        output.push('\n');

        if response.books.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                format!("No books found for {}.", subject).dimmed()
            ));
        }

        for (i, book) in response.books.iter().enumerate() {
            output.push_str(&format!(
                "\n{} {}\n",
                format!("{}.", i + 1).yellow().bold(),
                book.title.bold()
            ));
            output.push_str(&format!("   {} {}\n", "by".dimmed(), book.author));
            if !book.description.trim().is_empty() {
                output.push_str(&Self::indent(book.description.trim(), "   "));
                output.push('\n');
            }
            output.push_str(&format!("   {}  {}\n", "Link:".cyan(), book.url));
            output.push_str(&format!(
                "   {} {}\n",
                "Cover:".cyan(),
                book.cover_or_placeholder()
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Describe every registered flow
    pub fn format_flows(catalog: &FlowCatalog) -> String {
        let mut output = String::new();

        for flow in catalog.iter() {
            output.push_str(&format!("{}\n", flow.name().cyan().bold()));
            output.push_str(&format!(
                "  {} {} ({})\n",
                "Request:".bold(),
                flow.request_schema().name(),
                flow.request_schema().field_names().collect::<Vec<_>>().join(", ")
            ));
            output.push_str(&format!(
                "  {} {}\n",
                "Response:".bold(),
                flow.response_schema().name()
            ));

            output.push_str(&format!("  {}\n", "Template:".bold()));
            output.push_str(&Self::indent(flow.template().source(), "    "));
            output.push('\n');

            output.push_str(&format!("  {}\n", "Response schema:".bold()));
            output.push_str(&Self::indent(
                &format!("{:#}", flow.response_schema().to_json_schema()),
                "    ",
            ));
            output.push_str("\n\n");
        }

        output
    }

    /// Format the suggested subjects
    pub fn format_subjects(subjects: &[&str]) -> String {
        let mut output = format!("{}\n", "Suggested subjects:".cyan().bold());
        for subject in subjects {
            output.push_str(&format!("  * {}\n", subject));
        }
        output
    }

    /// Format as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_domain::{Book, PLACEHOLDER_COVER_URL, SUGGESTED_SUBJECTS};

    fn plain() {
        colored::control::set_override(false);
    }

    fn book(cover: &str) -> Book {
        Book {
            title: "Cosmos".to_string(),
            author: "Carl Sagan".to_string(),
            description: "A personal voyage.".to_string(),
            cover_image_url: cover.to_string(),
            url: "https://example.com/cosmos".to_string(),
        }
    }

    #[test]
    fn test_format_answer() {
        plain();
        let output = ConsoleFormatter::format_answer(
            "Mathematics",
            "What is 2 + 2?",
            &AskQuestionResponse {
                answer: "4".to_string(),
                explanation: "Two pairs make four.\nCount them.".to_string(),
            },
        );

        assert!(output.contains("Mathematics"));
        assert!(output.contains("Q: What is 2 + 2?"));
        assert!(output.contains("  4\n"));
        assert!(output.contains("  Two pairs make four.\n  Count them."));
    }

    #[test]
    fn test_format_books_uses_placeholder_cover() {
        plain();
        let output = ConsoleFormatter::format_books(
            "Science",
            &FindBooksResponse {
                books: vec![book(""), book("https://example.com/cover.png")],
            },
        );

        assert!(output.contains("Books on Science"));
        assert!(output.contains("1. Cosmos"));
        assert!(output.contains("2. Cosmos"));
        assert!(output.contains("by Carl Sagan"));
        assert!(output.contains(&format!("Cover: {}", PLACEHOLDER_COVER_URL)));
        assert!(output.contains("Cover: https://example.com/cover.png"));
    }

    #[test]
    fn test_format_books_empty() {
        plain();
        let output =
            ConsoleFormatter::format_books("Art", &FindBooksResponse { books: Vec::new() });
        assert!(output.contains("No books found for Art."));
    }

    #[test]
    fn test_format_flows_lists_both_flows() {
        plain();
        let catalog = FlowCatalog::builtin().unwrap();
        let output = ConsoleFormatter::format_flows(&catalog);

        assert!(output.contains("ask_question"));
        assert!(output.contains("find_books"));
        assert!(output.contains("{{{subject}}}"));
        assert!(output.contains("\"coverImageUrl\""));
    }

    #[test]
    fn test_format_subjects() {
        plain();
        let output = ConsoleFormatter::format_subjects(SUGGESTED_SUBJECTS);
        assert!(output.contains("  * Computer Science\n"));
    }

    #[test]
    fn test_format_json_uses_wire_names() {
        let output = ConsoleFormatter::format_json(&FindBooksResponse {
            books: vec![book("")],
        });
        assert!(output.contains("\"coverImageUrl\": \"\""));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}

//! The built-in study flows

use super::Flow;
use crate::prompt::TemplateError;
use crate::study::schemas;

pub const ASK_QUESTION_FLOW: &str = "ask_question";
pub const FIND_BOOKS_FLOW: &str = "find_books";

const ASK_QUESTION_TEMPLATE: &str = r#"You are an AI study assistant that answers questions on a variety of subjects.

Subject: {{{subject}}}
Question: {{{question}}}

Answer the question and provide a detailed explanation."#;

const FIND_BOOKS_TEMPLATE: &str = r#"You are a helpful AI assistant that recommends books based on a given subject.

Given the subject: {{{subject}}}
Recommend a list of relevant books. Each book object should have the following fields: title, author, description, coverImageUrl, and url.
The coverImageUrl and url must be valid URLs.
Return the output in JSON format."#;

/// Every flow the application serves
#[derive(Debug, Clone)]
pub struct FlowCatalog {
    ask_question: Flow,
    find_books: Flow,
}

impl FlowCatalog {
    /// Build the study flows. Templates are compiled here, so a template
    /// that drifts from its request schema fails at startup.
    pub fn builtin() -> Result<Self, TemplateError> {
        Ok(Self {
            ask_question: Flow::define(
                ASK_QUESTION_FLOW,
                schemas::ask_question_request(),
                schemas::ask_question_response(),
                ASK_QUESTION_TEMPLATE,
            )?,
            find_books: Flow::define(
                FIND_BOOKS_FLOW,
                schemas::find_books_request(),
                schemas::find_books_response(),
                FIND_BOOKS_TEMPLATE,
            )?,
        })
    }

    pub fn ask_question(&self) -> &Flow {
        &self.ask_question
    }

    pub fn find_books(&self) -> &Flow {
        &self.find_books
    }

    pub fn get(&self, name: &str) -> Option<&Flow> {
        self.iter().find(|flow| flow.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flow> {
        [&self.ask_question, &self.find_books].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_flows_compile() {
        let catalog = FlowCatalog::builtin().unwrap();
        let names: Vec<_> = catalog.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec![ASK_QUESTION_FLOW, FIND_BOOKS_FLOW]);
        assert!(catalog.get(FIND_BOOKS_FLOW).is_some());
        assert!(catalog.get("summarize").is_none());
    }

    #[test]
    fn test_ask_question_prompt() {
        let catalog = FlowCatalog::builtin().unwrap();
        let prompt = catalog
            .ask_question()
            .template()
            .render(&json!({
                "subject": "Mathematics",
                "question": "What is the Pythagorean theorem and why does it work?"
            }))
            .unwrap();

        assert!(prompt.starts_with("You are an AI study assistant"));
        assert!(prompt.contains("Subject: Mathematics\n"));
        assert!(prompt.contains("Question: What is the Pythagorean theorem and why does it work?"));
    }

    #[test]
    fn test_find_books_prompt_binds_subject_only() {
        let catalog = FlowCatalog::builtin().unwrap();
        let template = catalog.find_books().template();
        assert_eq!(template.placeholders(), vec!["subject"]);

        let prompt = template.render(&json!({"subject": "Quantum Physics"})).unwrap();
        assert!(prompt.contains("Given the subject: Quantum Physics"));
    }
}

//! Flow definitions
//!
//! A [`Flow`] binds a request schema, a response schema and a prompt
//! template under one name. Flows are built once at startup and shared
//! read-only afterwards.

mod catalog;

pub use catalog::{ASK_QUESTION_FLOW, FIND_BOOKS_FLOW, FlowCatalog};

use crate::prompt::{PromptTemplate, TemplateError};
use crate::schema::Schema;

/// A named, schema-bound prompt operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    name: String,
    request_schema: Schema,
    response_schema: Schema,
    template: PromptTemplate,
}

impl Flow {
    /// Define a flow, compiling `template_source` against `request_schema`.
    ///
    /// Fails if the template references a field the request schema does
    /// not declare.
    pub fn define(
        name: impl Into<String>,
        request_schema: Schema,
        response_schema: Schema,
        template_source: &str,
    ) -> Result<Self, TemplateError> {
        let name = name.into();
        let template = PromptTemplate::compile(name.clone(), template_source, &request_schema)?;
        Ok(Self {
            name,
            request_schema,
            response_schema,
            template,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn request_schema(&self) -> &Schema {
        &self.request_schema
    }

    pub fn response_schema(&self) -> &Schema {
        &self.response_schema
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;

    #[test]
    fn test_define_rejects_unbound_placeholder() {
        let request = Schema::define("Req", vec![FieldSpec::string("subject", "Subject")]);
        let response = Schema::define("Resp", vec![FieldSpec::string("answer", "Answer")]);

        let err = Flow::define("bad", request, response, "{{{subject}}} {{{topic}}}").unwrap_err();
        assert!(matches!(
            err,
            TemplateError::UnknownPlaceholder { ref placeholder, .. } if placeholder == "topic"
        ));
    }

    #[test]
    fn test_define_keeps_schemas() {
        let request = Schema::define("Req", vec![FieldSpec::string("subject", "Subject")]);
        let response = Schema::define("Resp", vec![FieldSpec::string("answer", "Answer")]);

        let flow = Flow::define("echo", request.clone(), response.clone(), "{{subject}}").unwrap();
        assert_eq!(flow.name(), "echo");
        assert_eq!(flow.request_schema(), &request);
        assert_eq!(flow.response_schema(), &response);
        assert_eq!(flow.template().name(), "echo");
    }
}

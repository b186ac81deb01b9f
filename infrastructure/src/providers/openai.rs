//! OpenAI-compatible adapter (`/chat/completions`).
//!
//! Works against api.openai.com and any server speaking the same protocol
//! (point `providers.openai.base_url` at it).

use super::ModelSettings;
use super::error::ProviderError;
use super::guidance::with_shape_guidance;
use super::http::{parse_base_url, send_json};
use async_trait::async_trait;
use reqwest::Client;
use scholar_application::{ModelError, ModelInvoker};
use scholar_domain::Schema;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Choice {
    message: Option<ReplyMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReplyMessage {
    content: Option<String>,
    refusal: Option<String>,
}

/// [`ModelInvoker`] backed by an OpenAI-compatible chat completions API.
pub struct OpenAiInvoker {
    client: Client,
    api_key: String,
    base_url: String,
    settings: ModelSettings,
}

impl OpenAiInvoker {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        base_url: &str,
        settings: ModelSettings,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: parse_base_url("openai", base_url)?,
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn extract_text(response: ChatCompletionResponse) -> Result<String, ModelError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(ModelError::EmptyOutput)?;

        if choice.finish_reason.as_deref() == Some("content_filter") {
            return Err(ModelError::Blocked("content_filter".to_string()));
        }

        let message = choice.message.unwrap_or_default();
        if let Some(refusal) = message.refusal.filter(|r| !r.trim().is_empty()) {
            return Err(ModelError::Blocked(refusal));
        }

        match message.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(ModelError::EmptyOutput),
        }
    }
}

#[async_trait]
impl ModelInvoker for OpenAiInvoker {
    fn describe(&self) -> String {
        format!("openai:{}", self.settings.model)
    }

    async fn invoke(&self, prompt: &str, response_schema: &Schema) -> Result<String, ModelError> {
        let text = with_shape_guidance(prompt, response_schema);
        let body = ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &text,
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            max_tokens: self.settings.max_output_tokens,
            temperature: self.settings.temperature,
        };
        debug!("OpenAI request to {} ({} chars)", self.endpoint(), text.len());

        let request = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body);

        let response: ChatCompletionResponse = send_json(request, self.settings.timeout).await?;
        Self::extract_text(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_domain::study::schemas;
    use serde_json::{Value, json};
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn invoker(server: &MockServer) -> OpenAiInvoker {
        OpenAiInvoker::new(
            Client::new(),
            "sk-test",
            &format!("{}/v1/", server.uri()),
            ModelSettings {
                model: "gpt-test".to_string(),
                timeout: Duration::from_secs(5),
                temperature: None,
                max_output_tokens: 256,
            },
        )
        .unwrap()
    }

    fn reply(message: Value, finish_reason: &str) -> Value {
        json!({
            "id": "chatcmpl-1",
            "model": "gpt-test",
            "choices": [{"index": 0, "message": message, "finish_reason": finish_reason}]
        })
    }

    #[tokio::test]
    async fn test_invoke_returns_message_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(
                json!({"role": "assistant", "content": "{\"books\": []}"}),
                "stop",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let text = invoker(&server)
            .invoke("Recommend books", &schemas::find_books_response())
            .await
            .unwrap();

        assert_eq!(text, "{\"books\": []}");

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["model"], "gpt-test");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["max_tokens"], 256);
        assert!(body.get("temperature").is_none());
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_server_error_is_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = invoker(&server)
            .invoke("Hi", &schemas::ask_question_response())
            .await
            .unwrap_err();

        assert!(matches!(err, ModelError::HttpStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_content_filter_is_blocked() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(
                json!({"role": "assistant", "content": null}),
                "content_filter",
            )))
            .mount(&server)
            .await;

        let err = invoker(&server)
            .invoke("Hi", &schemas::ask_question_response())
            .await
            .unwrap_err();

        assert!(matches!(err, ModelError::Blocked(_)));
    }

    #[tokio::test]
    async fn test_refusal_is_blocked() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(
                json!({"role": "assistant", "content": null, "refusal": "I can't help with that."}),
                "stop",
            )))
            .mount(&server)
            .await;

        let err = invoker(&server)
            .invoke("Hi", &schemas::ask_question_response())
            .await
            .unwrap_err();

        assert_eq!(err, ModelError::Blocked("I can't help with that.".to_string()));
    }

    #[tokio::test]
    async fn test_no_choices_is_empty_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = invoker(&server)
            .invoke("Hi", &schemas::ask_question_response())
            .await
            .unwrap_err();

        assert_eq!(err, ModelError::EmptyOutput);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let server = MockServer::start().await;
        let invoker = invoker(&server);
        drop(server);

        let err = invoker
            .invoke("Hi", &schemas::ask_question_response())
            .await
            .unwrap_err();

        assert!(matches!(err, ModelError::Transport(_) | ModelError::Timeout(_)));
    }
}

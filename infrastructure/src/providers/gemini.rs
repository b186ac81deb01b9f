//! Google Gemini adapter (`models/{model}:generateContent`).

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

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const BLOCKING_FINISH_REASONS: [&str; 5] = [
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

// ==================== Wire types ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PromptFeedback {
    block_reason: Option<String>,
}

// ==================== Invoker ====================

/// [`ModelInvoker`] backed by the Gemini API.
pub struct GeminiInvoker {
    client: Client,
    api_key: String,
    base_url: String,
    settings: ModelSettings,
}

impl GeminiInvoker {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        base_url: &str,
        settings: ModelSettings,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: parse_base_url("gemini", base_url)?,
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url, self.settings.model
        )
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String, ModelError> {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ModelError::Blocked(format!("prompt blocked: {}", reason)));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(ModelError::EmptyOutput)?;

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if BLOCKING_FINISH_REASONS.contains(&reason) {
                return Err(ModelError::Blocked(format!("candidate stopped: {}", reason)));
            }
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ModelError::EmptyOutput);
        }
        Ok(text)
    }
}

#[async_trait]
impl ModelInvoker for GeminiInvoker {
    fn describe(&self) -> String {
        format!("gemini:{}", self.settings.model)
    }

    async fn invoke(&self, prompt: &str, response_schema: &Schema) -> Result<String, ModelError> {
        let text = with_shape_guidance(prompt, response_schema);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: &text }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                max_output_tokens: self.settings.max_output_tokens,
                temperature: self.settings.temperature,
            },
        };
        debug!("Gemini request to {} ({} chars)", self.endpoint(), text.len());

        let request = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body);

        let response: GenerateContentResponse = send_json(request, self.settings.timeout).await?;
        Self::extract_text(response)
    }
}

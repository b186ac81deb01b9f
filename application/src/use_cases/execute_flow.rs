//! Execute Flow use case.
//!
//! Runs one [`Flow`] end to end:
//!
//! 1. Validate the request against the flow's request schema
//! 2. Render the prompt template with the validated request
//! 3. Invoke the model under a bounded timeout
//! 4. Decode and validate the reply against the response schema
//!
//! Each step short-circuits with a classified [`FlowError`]. The use case
//! holds no per-call state, so concurrent executions are independent.

use crate::config::InvocationParams;
use crate::ports::model_invoker::{ModelError, ModelInvoker};
use crate::ports::progress::{FlowProgressNotifier, NoFlowProgress};
use scholar_domain::schema::ROOT_PATH;
use scholar_domain::text::preview;
use scholar_domain::{
    Flow, ResponseError, TemplateError, ViolationKind, Violations, parse_response,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Broad failure classes, for callers that branch on the kind only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowErrorKind {
    InvalidRequest,
    ModelUnavailable,
    MalformedResponse,
}

/// Errors that can occur while executing a flow
#[derive(Error, Debug)]
pub enum FlowError {
    /// The request broke its schema; nothing was sent to the model.
    #[error("Invalid request for {flow}: {violations}")]
    InvalidRequest { flow: String, violations: Violations },

    /// Transport failure, non-2xx, empty output or timeout.
    #[error("Model unavailable for {flow}: {source}")]
    ModelUnavailable {
        flow: String,
        #[source]
        source: ModelError,
    },

    /// The model answered, but not with a conforming value.
    #[error("Malformed response for {flow}: {source}")]
    MalformedResponse {
        flow: String,
        #[source]
        source: ResponseError,
    },
}

impl FlowError {
    pub fn kind(&self) -> FlowErrorKind {
        match self {
            FlowError::InvalidRequest { .. } => FlowErrorKind::InvalidRequest,
            FlowError::ModelUnavailable { .. } => FlowErrorKind::ModelUnavailable,
            FlowError::MalformedResponse { .. } => FlowErrorKind::MalformedResponse,
        }
    }

    /// Only an unavailable model is worth retrying
    pub fn is_retryable(&self) -> bool {
        self.kind() == FlowErrorKind::ModelUnavailable
    }

    /// Name of the flow that failed
    pub fn flow(&self) -> &str {
        match self {
            FlowError::InvalidRequest { flow, .. }
            | FlowError::ModelUnavailable { flow, .. }
            | FlowError::MalformedResponse { flow, .. } => flow,
        }
    }

    /// Request violations, for [`FlowErrorKind::InvalidRequest`]
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            FlowError::InvalidRequest { violations, .. } => Some(violations),
            _ => None,
        }
    }
}

/// Use case for executing a flow against the model service.
#[derive(Clone)]
pub struct ExecuteFlowUseCase {
    invoker: Arc<dyn ModelInvoker>,
    params: InvocationParams,
}

impl ExecuteFlowUseCase {
    pub fn new(invoker: Arc<dyn ModelInvoker>) -> Self {
        Self {
            invoker,
            params: InvocationParams::default(),
        }
    }

    pub fn with_params(mut self, params: InvocationParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &InvocationParams {
        &self.params
    }

    /// Execute `flow` with an untyped request value.
    pub async fn execute(&self, flow: &Flow, request: Value) -> Result<Value, FlowError> {
        self.execute_with_progress(flow, request, &NoFlowProgress)
            .await
    }

    /// Execute `flow` with progress callbacks.
    pub async fn execute_with_progress(
        &self,
        flow: &Flow,
        request: Value,
        progress: &dyn FlowProgressNotifier,
    ) -> Result<Value, FlowError> {
        let started = Instant::now();
        info!("Starting flow {} via {}", flow.name(), self.invoker.describe());

        let request = flow
            .request_schema()
            .validate(&request)
            .map_err(|violations| {
                warn!("Flow {}: rejected request: {}", flow.name(), violations);
                FlowError::InvalidRequest {
                    flow: flow.name().to_string(),
                    violations,
                }
            })?;

        let prompt = flow
            .template()
            .render(&request)
            .map_err(|e| render_failure(flow, e))?;
        debug!(
            "Flow {}: rendered prompt ({} chars): {}",
            flow.name(),
            prompt.chars().count(),
            preview(&prompt, 100)
        );

        progress.on_model_call_start(flow.name());
        let timeout = self.params.timeout;
        let outcome = match tokio::time::timeout(
            timeout,
            self.invoker.invoke(&prompt, flow.response_schema()),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ModelError::Timeout(timeout)),
        };
        progress.on_model_call_end(flow.name(), outcome.is_ok());

        let raw = outcome.map_err(|source| {
            warn!(
                "Flow {}: model unavailable after {:?}: {}",
                flow.name(),
                started.elapsed(),
                source
            );
            FlowError::ModelUnavailable {
                flow: flow.name().to_string(),
                source,
            }
        })?;
        debug!("Flow {}: model replied with {} bytes", flow.name(), raw.len());

        let response = parse_response(&raw, flow.response_schema()).map_err(|source| {
            warn!(
                "Flow {}: rejected model output after {:?} ({}): {}",
                flow.name(),
                started.elapsed(),
                source,
                preview(&raw, 200)
            );
            FlowError::MalformedResponse {
                flow: flow.name().to_string(),
                source,
            }
        })?;

        info!("Flow {} completed in {:?}", flow.name(), started.elapsed());
        Ok(response)
    }

    /// Execute `flow` with typed request and response values.
    pub async fn execute_typed<Req, Resp>(&self, flow: &Flow, request: &Req) -> Result<Resp, FlowError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        self.execute_typed_with_progress(flow, request, &NoFlowProgress)
            .await
    }

    /// Execute `flow` with typed values and progress callbacks.
    pub async fn execute_typed_with_progress<Req, Resp>(
        &self,
        flow: &Flow,
        request: &Req,
        progress: &dyn FlowProgressNotifier,
    ) -> Result<Resp, FlowError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let value = serde_json::to_value(request).map_err(|e| FlowError::InvalidRequest {
            flow: flow.name().to_string(),
            violations: Violations::single(ROOT_PATH, ViolationKind::Unrepresentable(e.to_string())),
        })?;

        let response = self.execute_with_progress(flow, value, progress).await?;

        serde_json::from_value(response).map_err(|e| FlowError::MalformedResponse {
            flow: flow.name().to_string(),
            source: ResponseError::Decode(e.to_string()),
        })
    }
}

/// A validated request can only fail to render if an optional field the
/// template needs was left out; that is still the caller's request at fault.
fn render_failure(flow: &Flow, error: TemplateError) -> FlowError {
    let violations = match error {
        TemplateError::MissingField { field, .. } => {
            Violations::single(field, ViolationKind::Missing)
        }
        other => Violations::single(ROOT_PATH, ViolationKind::Unrepresentable(other.to_string())),
    };
    warn!("Flow {}: could not render prompt: {}", flow.name(), violations);
    FlowError::InvalidRequest {
        flow: flow.name().to_string(),
        violations,
    }
}

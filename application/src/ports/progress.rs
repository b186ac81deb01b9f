//! Progress notification port
//!
//! Defines the interface for reporting progress while a flow executes.

/// Callback for progress updates during flow execution
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, log line, nothing at all).
pub trait FlowProgressNotifier: Send + Sync {
    /// Called once the request passed validation and the model call is about to start
    fn on_model_call_start(&self, _flow: &str) {}

    /// Called when the model call returns, successfully or not
    fn on_model_call_end(&self, _flow: &str, _success: bool) {}

    /// Called when the user abandons the flow, whether or not a call is in flight
    fn on_cancelled(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoFlowProgress;

impl FlowProgressNotifier for NoFlowProgress {}

//! Application layer for scholar-ai
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{InvocationParams, RetryPolicy};
pub use ports::model_invoker::{ModelError, ModelInvoker};
pub use ports::progress::{FlowProgressNotifier, NoFlowProgress};
pub use use_cases::execute_flow::{ExecuteFlowUseCase, FlowError, FlowErrorKind};
pub use use_cases::study_actions::StudyActions;

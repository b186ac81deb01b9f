//! Application-level configuration.
//!
//! - [`InvocationParams`]: per-call bounds applied by the flow orchestrator
//! - [`RetryPolicy`]: explicit, caller-chosen retry of retryable failures

pub mod invocation_params;
pub mod retry_policy;

pub use invocation_params::InvocationParams;
pub use retry_policy::RetryPolicy;

//! Invocation parameters: bounds on each model call.
//!
//! [`InvocationParams`] groups the static parameters the
//! [`ExecuteFlowUseCase`](crate::use_cases::execute_flow::ExecuteFlowUseCase)
//! applies to every model call.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationParams {
    /// Upper bound on waiting for one model reply.
    pub timeout: Duration,
}

impl Default for InvocationParams {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl InvocationParams {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        assert_eq!(InvocationParams::default().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_with_timeout() {
        let params = InvocationParams::default().with_timeout(Duration::from_millis(250));
        assert_eq!(params.timeout, Duration::from_millis(250));
    }
}

//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod model_invoker;
pub mod progress;

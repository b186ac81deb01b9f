//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod execute_flow;
pub mod study_actions;

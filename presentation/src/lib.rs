//! Presentation layer for scholar-ai
//!
//! This crate contains CLI definitions, output formatters,
//! error notices, and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::notice::ErrorNotice;
pub use progress::reporter::{ProgressReporter, SimpleProgress};

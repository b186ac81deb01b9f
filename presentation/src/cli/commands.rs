//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for flow results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Text,
    /// The validated response object as JSON
    Json,
}

/// CLI arguments for scholar-ai
#[derive(Parser, Debug)]
#[command(name = "scholar-ai")]
#[command(author, version, about = "AI study assistant - ask questions and find books on any subject")]
#[command(long_about = r#"
scholar-ai answers study questions and recommends books by sending a
structured prompt to a generative model and validating what comes back.

Configuration files are loaded from (in priority order):
1. SCHOLAR_* environment variables   e.g. SCHOLAR_MODEL__NAME
2. --config <path>                   Explicit config file
3. ./scholar.toml                    Project-level config
4. ~/.config/scholar-ai/config.toml  Global config

Example:
  scholar-ai ask --subject Mathematics "What is the Pythagorean theorem and why does it work?"
  scholar-ai books "Quantum Physics"
  scholar-ai --output json books History
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Retry this many times when the model service is unavailable
    #[arg(long, value_name = "N", default_value_t = 0, global = true)]
    pub retries: u32,

    /// Model provider (gemini or openai)
    #[arg(long, value_name = "PROVIDER", global = true)]
    pub provider: Option<String>,

    /// Model name
    #[arg(short, long, value_name = "MODEL", global = true)]
    pub model: Option<String>,

    /// Seconds to wait for the model before giving up
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask a question about a subject
    Ask {
        /// Subject the question belongs to
        #[arg(short, long, default_value = "General Knowledge")]
        subject: String,

        /// The question (10 to 500 characters)
        question: String,
    },

    /// Recommend books for a subject
    Books {
        /// Subject to find books for
        subject: String,
    },

    /// List the registered flows with their templates and response schemas
    Flows,

    /// List suggested subjects
    Subjects,
}

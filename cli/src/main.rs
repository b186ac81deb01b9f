//! CLI entrypoint for scholar-ai
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use scholar_application::{
    ExecuteFlowUseCase, FlowError, FlowProgressNotifier, InvocationParams, NoFlowProgress,
    RetryPolicy, StudyActions,
};
use scholar_domain::{AskQuestionRequest, FindBooksRequest, FlowCatalog, SUGGESTED_SUBJECTS};
use scholar_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, Severity, build_http_client, build_invoker,
    config::has_errors,
};
use scholar_presentation::{
    Cli, Command, ConsoleFormatter, ErrorNotice, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const RETRY_BACKOFF: Duration = Duration::from_secs(2);
const EXIT_CANCELLED: u8 = 130;

/// A command that calls the model
#[derive(Debug, Clone, PartialEq, Eq)]
enum FlowRequest {
    Ask(AskQuestionRequest),
    Books(FindBooksRequest),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let catalog = Arc::new(FlowCatalog::builtin().context("Built-in flow templates are invalid")?);

    let request = match command {
        Command::Subjects => {
            print!("{}", ConsoleFormatter::format_subjects(SUGGESTED_SUBJECTS));
            return Ok(ExitCode::SUCCESS);
        }
        Command::Flows => {
            print!("{}", ConsoleFormatter::format_flows(&catalog));
            return Ok(ExitCode::SUCCESS);
        }
        Command::Ask { subject, question } => {
            FlowRequest::Ask(AskQuestionRequest::new(subject, question))
        }
        Command::Books { subject } => FlowRequest::Books(FindBooksRequest::new(subject)),
    };

    let config = load_config(&cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }
    let format = cli.output.unwrap_or(match config.output.format {
        FileOutputFormat::Text => OutputFormat::Text,
        FileOutputFormat::Json => OutputFormat::Json,
    });

    // === Dependency Injection ===
    // One HTTP client for the whole process, shared by the invoker
    let client = build_http_client()?;
    let invoker = build_invoker(&config, client)?;
    let params = InvocationParams::default().with_timeout(config.model.timeout());
    let actions = StudyActions::new(catalog, ExecuteFlowUseCase::new(invoker).with_params(params));

    let retry = if cli.retries > 0 {
        RetryPolicy::with_retries(cli.retries, RETRY_BACKOFF)
    } else {
        RetryPolicy::none()
    };

    let progress: Box<dyn FlowProgressNotifier> =
        if cli.quiet || format == OutputFormat::Json {
            Box::new(NoFlowProgress)
        } else if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };

    // Dropping the flow future on Ctrl-C aborts the in-flight request
    let outcome = tokio::select! {
        outcome = run_flow(&request, &actions, &retry, progress.as_ref(), format) => outcome,
        _ = tokio::signal::ctrl_c() => {
            progress.on_cancelled();
            eprintln!("Cancelled.");
            return Ok(ExitCode::from(EXIT_CANCELLED));
        }
    };

    match outcome {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            info!("Flow failed: {}", e);
            let notice = ErrorNotice::from_error(&e);
            eprint!("{}", notice.render());
            Ok(ExitCode::from(notice.exit_code()))
        }
    }
}

/// Load file/env configuration, apply command-line overrides, and validate.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, cli);

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => error!("{}", issue.message),
        }
    }
    if has_errors(&issues) {
        let messages: Vec<&str> = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(|i| i.message.as_str())
            .collect();
        bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }

    Ok(config)
}

fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(provider) = &cli.provider {
        config.model.provider = provider.clone();
    }
    if let Some(model) = &cli.model {
        config.model.name = Some(model.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.model.timeout_secs = timeout;
    }
}

async fn run_flow(
    request: &FlowRequest,
    actions: &StudyActions,
    retry: &RetryPolicy,
    progress: &dyn FlowProgressNotifier,
    format: OutputFormat,
) -> Result<String, FlowError> {
    match request {
        FlowRequest::Ask(request) => {
            let response = retry
                .run(move || actions.ask_ai_with_progress(request, progress))
                .await?;
            Ok(match format {
                OutputFormat::Json => ConsoleFormatter::format_json(&response),
                OutputFormat::Text => {
                    ConsoleFormatter::format_answer(&request.subject, &request.question, &response)
                }
            })
        }
        FlowRequest::Books(request) => {
            let response = retry
                .run(move || actions.find_books_with_progress(request, progress))
                .await?;
            Ok(match format {
                OutputFormat::Json => ConsoleFormatter::format_json(&response),
                OutputFormat::Text => ConsoleFormatter::format_books(&request.subject, &response),
            })
        }
    }
}

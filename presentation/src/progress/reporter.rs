//! Progress reporting for flow execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use scholar_application::FlowProgressNotifier;
use scholar_domain::{ASK_QUESTION_FLOW, FIND_BOOKS_FLOW};
use std::sync::Mutex;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

/// What to show while `flow` is waiting on the model
pub fn waiting_message(flow: &str) -> &'static str {
    match flow {
        ASK_QUESTION_FLOW => "Thinking...",
        FIND_BOOKS_FLOW => "Searching for books...",
        _ => "Working...",
    }
}

/// Shows a spinner on stderr for the duration of the model call
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowProgressNotifier for ProgressReporter {
    fn on_model_call_start(&self, flow: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(waiting_message(flow));
        pb.enable_steady_tick(TICK);

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn on_model_call_end(&self, _flow: &str, _success: bool) {
        self.clear();
    }

    fn on_cancelled(&self) {
        self.clear();
    }
}

/// Simple text-based progress (no spinner), for non-terminal stderr
pub struct SimpleProgress;

impl FlowProgressNotifier for SimpleProgress {
    fn on_model_call_start(&self, flow: &str) {
        eprintln!("{} {}", "->".cyan(), waiting_message(flow));
    }

    fn on_model_call_end(&self, _flow: &str, success: bool) {
        if success {
            eprintln!("  {} done", "v".green());
        } else {
            eprintln!("  {} failed", "x".red());
        }
    }

    fn on_cancelled(&self) {
        eprintln!("  {} cancelled", "x".yellow());
    }
}

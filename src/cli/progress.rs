//! CLI progress callback with styled output and a spinner for network waits

use crate::cli::style::{Stream, Stylize, check, hyperlink_url, spinner_style};
use anstream::println;
use async_trait::async_trait;
use coursectl::progress::{Phase, ProgressCallback};
use coursectl::types::MergeRequest;
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;

/// Prints lifecycle progress to the terminal
///
/// Phases that wait on GitLab show a spinner; every other phase prints a
/// header line, since git and make write their own output underneath it.
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// New callback with no spinner running
    pub const fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: String) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn stop_spinner(&self) {
        if let Some(bar) = self.spinner.lock().ok().and_then(|mut slot| slot.take()) {
            bar.finish_and_clear();
        }
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Resolving | Phase::CreatingMergeRequest => {
                self.start_spinner(format!("{phase}..."));
            }
            Phase::Complete => self.stop_spinner(),
            _ => {
                self.stop_spinner();
                println!("{}...", phase.to_string().emphasis());
            }
        }
    }

    async fn on_message(&self, message: &str) {
        self.stop_spinner();
        println!("{message}");
    }

    async fn on_merge_request_created(&self, task: &str, mr: &MergeRequest) {
        self.stop_spinner();
        println!(
            "{} Created merge request {} for {}",
            check(),
            format!("!{}", mr.iid).accent(),
            task.emphasis()
        );
        println!("  {}", hyperlink_url(Stream::Stdout, &mr.web_url));
    }
}

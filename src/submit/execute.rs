//! Merge request execution
//!
//! Confirmation gate, optional test run, and filing through the review
//! gateway. The task is recorded as merged only after the request exists.

use crate::build::TestFlavor;
use crate::config::MergeSettings;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::platform::ReviewGateway;
use crate::progress::{Phase, ProgressCallback};
use crate::submit::plan_merge_request;
use crate::types::{MergeRequest, TaskKind};
use tracing::{info, warn};

/// Options for [`submit_merge_request`]
#[derive(Debug, Clone, Copy)]
pub struct SubmitOptions {
    /// Run tests before filing (subject to `test_before_merge`)
    pub run_tests: bool,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self { run_tests: true }
    }
}

/// File a merge request for the active task
///
/// An already-merged task asks for confirmation first; declining returns
/// `Cancelled` without touching the gateway. A failing test run aborts with
/// the test exit code.
pub async fn submit_merge_request(
    ctx: &mut Context,
    settings: &MergeSettings,
    gateway: &dyn ReviewGateway,
    options: SubmitOptions,
    progress: &dyn ProgressCallback,
) -> Result<MergeRequest> {
    let task = ctx.active_task()?;

    if ctx.state.was_merged(&task.name) {
        let question = format!(
            "Task {} was already merged. Are you sure you want to continue?",
            task.name
        );
        if !ctx.prompt.confirm(&question)? {
            progress.on_message("Task not merged").await;
            return Err(Error::Cancelled);
        }
    }

    let test_before_merge = match settings.test_before_merge {
        Some(value) => value,
        None => {
            let note = "Key test_before_merge not found in configuration file. Assuming true";
            info!("{note}");
            progress.on_message(note).await;
            true
        }
    };

    progress.on_phase(Phase::Resolving).await;
    let login = gateway.authenticate().await?;
    info!("Authenticated as {login}");
    let project = gateway.resolve_project(&settings.project_path()).await?;
    let assignee = gateway.resolve_user(&settings.assignee_username).await?;

    if options.run_tests && test_before_merge {
        if task.kind == TaskKind::Practical {
            progress.on_phase(Phase::Testing).await;
            ctx.build.run_tests(&task.name, TestFlavor::All).await?;
        } else {
            warn!("{} is a theoretical task, skipping tests", task.name);
        }
    }

    progress.on_phase(Phase::CreatingMergeRequest).await;
    let request = plan_merge_request(settings, &task, assignee.id);
    let mr = gateway.create_merge_request(&project, &request).await?;
    info!("Created merge request !{} for {}", mr.iid, task.name);

    ctx.state.record_merge(&task.name);
    progress.on_merge_request_created(&task.name, &mr).await;
    progress.on_phase(Phase::Complete).await;

    Ok(mr)
}

//! Task selection: branch checkout-or-create plus solution scaffolding

use crate::context::Context;
use crate::error::{Error, Result};
use crate::progress::{Phase, ProgressCallback};
use crate::state::SessionState;
use crate::task::scaffold_solution;
use crate::types::{Task, normalize_task_name};
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for [`select_task`]
#[derive(Debug, Clone)]
pub struct SelectOptions {
    /// Template to copy, relative to the task directory
    pub template: Option<PathBuf>,
    /// Copy a template into practical solutions (otherwise create an empty file)
    pub use_template: bool,
    /// Reject names that are not `<group>/<name>` tasks of the course
    pub check_name: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            template: None,
            use_template: true,
            check_name: true,
        }
    }
}

/// What [`select_task`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Branch already existed and was checked out; nothing scaffolded
    Existing(Task),
    /// Branch was created; `solution` is the new file, if one was written
    Created {
        /// The selected task
        task: Task,
        /// Newly created solution file
        solution: Option<PathBuf>,
    },
}

impl Selection {
    /// The selected task
    pub const fn task(&self) -> &Task {
        match self {
            Self::Existing(task) | Self::Created { task, .. } => task,
        }
    }
}

/// Make `raw_name` the active task
///
/// An existing branch is only checked out, never scaffolded. A new branch is
/// created from the base branch, its solution file scaffolded, and the file
/// committed and pushed as the initial commit. The active task changes only
/// when everything succeeds; a failed checkout clears it.
pub async fn select_task(
    ctx: &mut Context,
    raw_name: &str,
    options: &SelectOptions,
    progress: &dyn ProgressCallback,
) -> Result<Selection> {
    let name = normalize_task_name(raw_name);
    if name.is_empty() {
        return Err(Error::InvalidTaskName(raw_name.to_string()));
    }

    progress.on_phase(Phase::SwitchingBranch).await;

    if ctx.vcs.branch_exists(&name).await? {
        let result = ctx.vcs.checkout(&name).await;
        clear_on_checkout_failure(&mut ctx.state, result)?;

        let task = ctx.resolver.resolve(&name);
        ctx.state.current_task.clone_from(&name);
        info!("Switched to existing task {name}");
        return Ok(Selection::Existing(task));
    }

    if options.check_name && !ctx.resolver.validate_name(&name) {
        info!("{name} is not a valid task name");
        return Err(Error::InvalidTaskName(name));
    }

    let result = ctx.vcs.create_and_checkout(&name).await;
    clear_on_checkout_failure(&mut ctx.state, result)?;

    let task = ctx.resolver.resolve(&name);

    progress.on_phase(Phase::Scaffolding).await;
    let solution = scaffold_solution(
        &ctx.resolver,
        &task,
        options.use_template,
        options.template.as_deref(),
    )?;

    if solution.is_some() {
        commit_initial_solution(ctx, &task, progress).await?;
    } else {
        progress
            .on_message(&format!("{} already exists", task.solution_relative_path()))
            .await;
    }

    ctx.state.current_task.clone_from(&name);
    info!("Switched to new task {name}");
    Ok(Selection::Created { task, solution })
}

fn clear_on_checkout_failure(state: &mut SessionState, result: Result<()>) -> Result<()> {
    if let Err(e) = result {
        if matches!(e, Error::CheckoutFailed(_)) {
            info!("{e}");
            state.current_task.clear();
        }
        return Err(e);
    }
    Ok(())
}

async fn commit_initial_solution(
    ctx: &Context,
    task: &Task,
    progress: &dyn ProgressCallback,
) -> Result<()> {
    let relative = task.solution_relative_path();
    let paths = [Path::new(&relative)];

    progress.on_phase(Phase::Committing).await;
    ctx.vcs.stage(&paths).await?;
    ctx.vcs
        .commit(&paths, &format!("Initial commit for {}", task.name))
        .await?;

    progress.on_phase(Phase::Pushing).await;
    ctx.vcs.push(&task.name).await
}

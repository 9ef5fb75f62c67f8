//! Solution committer
//!
//! Commits the active task's solution only when it actually changed, and
//! always pushes so commits made outside coursectl still reach the remote.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::progress::{Phase, ProgressCallback};
use crate::vcs::VcsGateway;
use regex::Regex;
use std::path::Path;
use tracing::{info, warn};

/// Outcome of [`commit_active_task`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new commit was created and pushed
    Committed,
    /// Solution matched the branch tip; only pushed
    UpToDate,
}

/// Commit message used when none is given
pub fn default_commit_message(task: &str) -> String {
    format!("{task} task solution changed")
}

/// Stage the task directory and report whether its solution file differs
/// from the branch tip
///
/// A task directory git refuses to stage (e.g. absent on the branch) counts
/// as unchanged.
pub async fn solution_changed(vcs: &dyn VcsGateway, task: &str) -> Result<bool> {
    let dir = Path::new(task);
    match vcs.stage(&[dir]).await {
        Ok(()) => {}
        Err(Error::Git { message, .. }) => {
            warn!("Cannot stage {task}: {message}");
            return Ok(false);
        }
        Err(e) => return Err(e),
    }
    let staged = vcs.staged_changes(dir).await?;

    let pattern = Regex::new(&format!(r"^{}/solution\.(hpp|md)$", regex::escape(task)))
        .map_err(|e| Error::Internal(format!("invalid solution pattern: {e}")))?;
    Ok(staged.iter().any(|path| pattern.is_match(path)))
}

/// Commit and push the active task's solution
pub async fn commit_active_task(
    ctx: &Context,
    message: Option<&str>,
    progress: &dyn ProgressCallback,
) -> Result<CommitOutcome> {
    let task = ctx.active_task()?;
    let message = message.map_or_else(|| default_commit_message(&task.name), ToString::to_string);

    let outcome = if solution_changed(ctx.vcs.as_ref(), &task.name).await? {
        progress.on_phase(Phase::Committing).await;
        ctx.vcs.commit(&[Path::new(&task.name)], &message).await?;
        info!("Committed {} with message {message:?}", task.name);
        CommitOutcome::Committed
    } else {
        warn!("Solution is up-to-date with local repository");
        CommitOutcome::UpToDate
    };

    progress.on_phase(Phase::Pushing).await;
    ctx.vcs.push(&task.name).await?;
    progress.on_phase(Phase::Complete).await;

    Ok(outcome)
}

//! Commit command - commit and push the active solution

use crate::cli::CliProgress;
use crate::cli::style::{Stylize, check};
use anstream::println;
use coursectl::commit::{CommitOutcome, commit_active_task};
use coursectl::context::Context;
use coursectl::error::Result;

/// Commit the active task's solution if it changed, then push
pub async fn run_commit(ctx: &mut Context, message: Option<&str>) -> Result<()> {
    let task = ctx.prepare_active_task().await?;
    let progress = CliProgress::new();

    match commit_active_task(ctx, message, &progress).await? {
        CommitOutcome::Committed => {
            println!("{} Committed and pushed {}", check(), task.name.accent());
        }
        CommitOutcome::UpToDate => println!("{} Pushed {}", check(), task.name.accent()),
    }
    Ok(())
}

//! Merge command - file a merge request for the active task

use crate::cli::CliProgress;
use coursectl::context::Context;
use coursectl::error::Result;
use coursectl::platform::create_review_gateway;
use coursectl::submit::{SubmitOptions, submit_merge_request};

/// Submit the active task for review
pub async fn run_merge(ctx: &mut Context, run_tests: bool) -> Result<()> {
    let settings = ctx.config.merge_settings()?;
    ctx.prepare_active_task().await?;
    let gateway = create_review_gateway(&settings)?;
    let progress = CliProgress::new();

    submit_merge_request(
        ctx,
        &settings,
        gateway.as_ref(),
        SubmitOptions { run_tests },
        &progress,
    )
    .await?;
    Ok(())
}

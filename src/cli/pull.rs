//! Pull command - update the course repository

use crate::cli::style::{Stylize, check};
use anstream::println;
use coursectl::context::Context;
use coursectl::error::Result;
use coursectl::vcs::{GitCli, VcsGateway};

/// `git pull` in the course repository
pub async fn run_pull(ctx: &Context, verbose: bool) -> Result<()> {
    let course = GitCli::new(ctx.config.course_repo.clone(), verbose);
    course.pull().await?;
    println!(
        "{} Updated {}",
        check(),
        ctx.config.course_repo.display().accent()
    );
    Ok(())
}

//! Build, test, style, and clean commands on the active task

use crate::cli::style::{Stylize, check};
use anstream::println;
use coursectl::build::{STYLE_TARGET, TestFlavor};
use coursectl::context::Context;
use coursectl::error::{Error, Result};

/// Generate the build directory for the active task
pub async fn run_build(ctx: &mut Context) -> Result<()> {
    let task = ctx.prepare_active_task().await?;
    ctx.build.configure(&task.name).await?;
    println!("{} Configured {}", check(), task.name.accent());
    Ok(())
}

/// Run one test flavor for the active task
pub async fn run_test(ctx: &mut Context, flavor: TestFlavor) -> Result<()> {
    let task = ctx.prepare_active_task().await?;
    ctx.build.run_tests(&task.name, flavor).await?;
    println!("{} Tests passed for {}", check(), task.name.accent());
    Ok(())
}

/// Run the formatter target for the active task
pub async fn run_style(ctx: &mut Context) -> Result<()> {
    let task = ctx.prepare_active_task().await?;
    let code = ctx.build.run_targets(&task.name, &[STYLE_TARGET]).await?;
    if code != 0 {
        return Err(Error::BuildFailed {
            command: format!("make {STYLE_TARGET}"),
            code,
        });
    }
    Ok(())
}

/// Empty the active task's build directory
pub async fn run_clean(ctx: &mut Context) -> Result<()> {
    let task = ctx.prepare_active_task().await?;
    ctx.build.clean(&task.name).await?;
    println!("{} Cleaned build directory of {}", check(), task.name.accent());
    Ok(())
}

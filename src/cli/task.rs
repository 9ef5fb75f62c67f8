//! Task and status commands

use crate::cli::CliProgress;
use crate::cli::style::{Stylize, check};
use anstream::{eprintln, println};
use coursectl::context::Context;
use coursectl::error::{Error, Result};
use coursectl::task::{SelectOptions, Selection, select_task};
use std::path::PathBuf;

/// Arguments of the `task` command
#[derive(Debug, Clone, Default)]
pub struct TaskArgs {
    /// Task name, `<group>/<name>`
    pub name: String,
    /// Skip task name validation
    pub force: bool,
    /// Template relative to the task directory
    pub template: Option<PathBuf>,
    /// Create an empty solution instead of copying a template
    pub no_template: bool,
}

impl TaskArgs {
    fn select_options(&self) -> SelectOptions {
        SelectOptions {
            template: self.template.clone(),
            use_template: !self.no_template,
            check_name: !self.force,
        }
    }
}

/// Select a task, creating its branch and solution on first use
pub async fn run_task(ctx: &mut Context, args: &TaskArgs) -> Result<()> {
    let progress = CliProgress::new();
    let selection = select_task(ctx, &args.name, &args.select_options(), &progress).await;

    match selection {
        Ok(Selection::Existing(task)) => {
            println!("{} Switched to {}", check(), task.name.accent());
        }
        Ok(Selection::Created { task, solution }) => {
            println!("{} Started {} ({})", check(), task.name.accent(), task.kind);
            if let Some(path) = solution {
                println!("  {}", path.display().muted());
            }
        }
        Err(e @ Error::TemplateNotFound { .. }) => {
            print_template_hint(&args.name);
            return Err(e);
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

fn print_template_hint(task: &str) {
    eprintln!(
        "{}",
        "Branch was created but the solution file was not. Retry with one of:".warn()
    );
    eprintln!("  coursectl task --template <template_file> {task}");
    eprintln!("  coursectl task --no-template {task}");
}

/// Print the active task
pub fn run_status(ctx: &Context) {
    match ctx.state.active_task() {
        Some(task) => println!("Current task: {}", task.accent()),
        None => println!("{}", "No task selected".muted()),
    }
    if !ctx.state.merged_tasks.is_empty() {
        println!("Merged: {}", ctx.state.merged_tasks.join(", ").muted());
    }
}

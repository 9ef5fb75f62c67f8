//! coursectl - task workflow for course solutions
//!
//! CLI binary that selects tasks, builds and tests them, and submits
//! solutions for review.

use anstream::eprintln;
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use coursectl::build::{CMakeBuild, TestFlavor};
use coursectl::config::{self, Config};
use coursectl::context::Context;
use coursectl::error::{Error, Result};
use coursectl::prompt::TerminalPrompt;
use coursectl::state::SessionState;
use coursectl::task::TaskResolver;
use coursectl::vcs::GitCli;
use std::error::Error as _;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Instrument, info, info_span};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::style::Stylize;

#[derive(Parser)]
#[command(name = "coursectl")]
#[command(about = "Task workflow for course solutions repositories")]
#[command(version)]
struct Cli {
    /// Show git output and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select a task, creating its branch and solution on first use
    Task {
        /// Task name, `<group>/<name>`
        name: String,

        /// Skip task name validation
        #[arg(short, long)]
        force: bool,

        /// Template file, relative to the task directory
        #[arg(short, long, conflicts_with = "no_template")]
        template: Option<PathBuf>,

        /// Create an empty solution file
        #[arg(long)]
        no_template: bool,
    },

    /// Show the active task
    Status,

    /// Show configuration entries
    Config,

    /// Configure the build directory of the active task
    Build,

    /// Run tests for the active task
    Test {
        /// Which tests to run
        #[arg(value_enum, default_value_t = TestFlavor::All)]
        flavor: TestFlavor,
    },

    /// Run the formatter on the active task
    Style,

    /// Empty the build directory of the active task
    Clean,

    /// Commit and push the active solution
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// File a merge request for the active task
    Merge {
        /// Do not run tests before filing
        #[arg(long)]
        no_tests: bool,
    },

    /// Pull the course repository
    #[command(alias = "update")]
    Pull,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let dir = match config::app_dir() {
        Ok(dir) => dir,
        Err(e) => return report(&e),
    };
    if let Err(e) = init_logging(&dir, cli.verbose) {
        eprintln!("{} {e:#}", "warning:".warn());
    }

    let config = match Config::load(&config::config_path(&dir)) {
        Ok(config) => config,
        Err(e) => return report(&e),
    };
    let state_file = config::state_path(&dir);
    let state = match SessionState::load(&state_file) {
        Ok(state) => state,
        Err(e) => return report(&e),
    };

    let vcs = Arc::new(GitCli::new(config.solutions_repo.clone(), cli.verbose));
    let build = Arc::new(CMakeBuild::new(TaskResolver::new(
        &config.course_repo,
        &config.solutions_repo,
    )));
    let mut ctx = Context::new(config, state, vcs, build, Arc::new(TerminalPrompt));

    let span = info_span!("task", name = %ctx.state.current_task);
    let outcome = tokio::select! {
        result = dispatch(&mut ctx, cli.command, cli.verbose).instrument(span) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    let exit = match outcome {
        Some(Ok(())) => ExitCode::SUCCESS,
        Some(Err(e)) if e.is_interrupt() => interrupted(),
        Some(Err(e)) => report(&e),
        None => interrupted(),
    };

    if let Err(e) = ctx.state.save(&state_file) {
        return report(&e);
    }
    exit
}

async fn dispatch(ctx: &mut Context, command: Commands, verbose: bool) -> Result<()> {
    match command {
        Commands::Task {
            name,
            force,
            template,
            no_template,
        } => {
            let args = cli::TaskArgs {
                name,
                force,
                template,
                no_template,
            };
            cli::run_task(ctx, &args).await
        }
        Commands::Status => {
            cli::run_status(ctx);
            Ok(())
        }
        Commands::Config => {
            cli::run_config(ctx);
            Ok(())
        }
        Commands::Build => cli::run_build(ctx).await,
        Commands::Test { flavor } => cli::run_test(ctx, flavor).await,
        Commands::Style => cli::run_style(ctx).await,
        Commands::Clean => cli::run_clean(ctx).await,
        Commands::Commit { message } => cli::run_commit(ctx, message.as_deref()).await,
        Commands::Merge { no_tests } => cli::run_merge(ctx, !no_tests).await,
        Commands::Pull => cli::run_pull(ctx, verbose).await,
    }
}

fn interrupted() -> ExitCode {
    eprintln!("exiting on user request");
    info!("Interrupted by user");
    ExitCode::SUCCESS
}

/// Print an error with its source chain and map it to an exit code
fn report(err: &Error) -> ExitCode {
    let code = err.exit_code();
    if !err.is_user_cancellation() {
        info!(exit_code = code, "command failed: {err}");
        eprintln!("{} {err}", "error:".error());
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  {} {cause}", "caused by:".muted().for_stderr());
            source = cause.source();
        }
    }
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

/// Stderr at WARN (DEBUG when verbose, `RUST_LOG` overrides) plus an INFO
/// log file in the config directory
fn init_logging(dir: &Path, verbose: bool) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    let log_path = config::log_path(dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("cannot open log file {}", log_path.display()))?;

    let default_level = if verbose { "debug" } else { "warn" };
    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .with_filter(stderr_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_filter(LevelFilter::INFO),
        )
        .try_init()
        .context("logging already initialised")?;
    Ok(())
}

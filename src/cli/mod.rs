//! CLI commands
//!
//! Command implementations for the `coursectl` binary.

mod build;
mod commit;
mod merge;
mod progress;
mod pull;
mod show_config;
pub mod style;
mod task;

pub use build::{run_build, run_clean, run_style, run_test};
pub use commit::run_commit;
pub use merge::run_merge;
pub use progress::CliProgress;
pub use pull::run_pull;
pub use show_config::run_config;
pub use task::{TaskArgs, run_status, run_task};

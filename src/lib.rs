//! coursectl - task workflow for course solutions repositories
//!
//! Tracks the active task, maps tasks to git branches, scaffolds solution
//! files, and files merge requests for review on GitLab.

pub mod build;
pub mod commit;
pub mod config;
pub mod context;
pub mod error;
pub mod platform;
pub mod progress;
pub mod prompt;
pub mod state;
pub mod submit;
pub mod task;
pub mod types;
pub mod vcs;

//! Version control gateway
//!
//! Abstracts the git operations the task lifecycle needs so the switcher,
//! committer, and submitter can run against a recording fake in tests.

mod git;

pub use git::GitCli;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Git operations against the solutions repository
///
/// Mutating operations map a non-zero exit to a typed error carrying the
/// process exit code (`CheckoutFailed`, `CommitFailed`, `PushFailed`,
/// `PullFailed`).
#[async_trait]
pub trait VcsGateway: Send + Sync {
    /// Whether `name` resolves to a ref
    ///
    /// "Not found" is `Ok(false)`; only an unusable repository is an error.
    async fn branch_exists(&self, name: &str) -> Result<bool>;

    /// Switch the working tree to an existing branch
    async fn checkout(&self, name: &str) -> Result<()>;

    /// Check out the base branch, then create `name` from it
    async fn create_and_checkout(&self, name: &str) -> Result<()>;

    /// Stage paths (relative to the repository root or absolute)
    async fn stage(&self, paths: &[&Path]) -> Result<()>;

    /// Staged files under `path` that differ from the branch tip
    ///
    /// Returned paths are relative to the repository root with `/`
    /// separators.
    async fn staged_changes(&self, path: &Path) -> Result<Vec<String>>;

    /// Commit the given paths with `message`
    async fn commit(&self, paths: &[&Path], message: &str) -> Result<()>;

    /// Push `branch` to origin, setting the upstream
    async fn push(&self, branch: &str) -> Result<()>;

    /// Pull the current branch
    async fn pull(&self) -> Result<()>;
}

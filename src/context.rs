//! Per-process context
//!
//! Built once at startup and handed to every command, so commands share no
//! hidden globals and tests can inject fakes for every external seam.

use crate::build::BuildSystem;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::prompt::Prompt;
use crate::state::SessionState;
use crate::task::TaskResolver;
use crate::types::Task;
use crate::vcs::VcsGateway;
use std::sync::Arc;
use tracing::info;

/// Everything a command needs
pub struct Context {
    /// Loaded configuration
    pub config: Config,
    /// Session state, persisted by the caller when the process exits
    pub state: SessionState,
    /// Task lookup over the course and solutions repositories
    pub resolver: TaskResolver,
    /// Git operations on the solutions repository
    pub vcs: Arc<dyn VcsGateway>,
    /// Build and test runner
    pub build: Arc<dyn BuildSystem>,
    /// Confirmation prompt
    pub prompt: Arc<dyn Prompt>,
}

impl Context {
    /// Assemble a context
    pub fn new(
        config: Config,
        state: SessionState,
        vcs: Arc<dyn VcsGateway>,
        build: Arc<dyn BuildSystem>,
        prompt: Arc<dyn Prompt>,
    ) -> Self {
        let resolver = TaskResolver::new(&config.course_repo, &config.solutions_repo);
        Self {
            config,
            state,
            resolver,
            vcs,
            build,
            prompt,
        }
    }

    /// The active task, or `NoActiveTask`
    pub fn active_task(&self) -> Result<Task> {
        self.state
            .active_task()
            .map(|name| self.resolver.resolve(name))
            .ok_or(Error::NoActiveTask)
    }

    /// Check out the active task's branch before a task-scoped command
    ///
    /// If the checkout fails the active task is cleared, so the next run
    /// starts from "no task" instead of a stale one.
    pub async fn prepare_active_task(&mut self) -> Result<Task> {
        let task = self.active_task()?;
        if let Err(e) = self.vcs.checkout(&task.name).await {
            info!("{} is a configured task but checkout failed: {e}", task.name);
            self.state.current_task.clear();
            return Err(Error::ActiveTaskCheckoutFailed(task.name));
        }
        Ok(task)
    }
}

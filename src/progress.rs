//! Progress callback trait for interface-agnostic updates
//!
//! Lifecycle operations report what they are doing through this trait so the
//! CLI can render styled output while tests stay silent.

use crate::types::MergeRequest;
use async_trait::async_trait;
use std::fmt;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Checking out or creating the task branch
    SwitchingBranch,
    /// Creating the solution file
    Scaffolding,
    /// Committing solution changes
    Committing,
    /// Pushing the task branch
    Pushing,
    /// Resolving project and assignee on the review gateway
    Resolving,
    /// Running the test suite
    Testing,
    /// Filing the merge request
    CreatingMergeRequest,
    /// Operation complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::SwitchingBranch => "Switching branch",
            Self::Scaffolding => "Creating solution file",
            Self::Committing => "Committing",
            Self::Pushing => "Pushing",
            Self::Resolving => "Resolving project and assignee",
            Self::Testing => "Running tests",
            Self::CreatingMergeRequest => "Creating merge request",
            Self::Complete => "Done",
        };
        f.write_str(text)
    }
}

/// Progress callback trait
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called with a general status message
    async fn on_message(&self, message: &str);

    /// Called when a merge request is filed
    async fn on_merge_request_created(&self, task: &str, mr: &MergeRequest);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_message(&self, _message: &str) {}
    async fn on_merge_request_created(&self, _task: &str, _mr: &MergeRequest) {}
}

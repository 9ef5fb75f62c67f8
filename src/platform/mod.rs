//! Code review services
//!
//! Abstracts the hosting service that receives merge requests, so the
//! submission flow can be driven against a recording fake in tests.

mod factory;
mod gitlab;

pub use factory::create_review_gateway;
pub use gitlab::GitLabService;

use crate::error::Result;
use crate::types::{MergeRequest, NewMergeRequest, Project, User};
use async_trait::async_trait;

/// Review service trait for merge request operations
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// Verify the token; returns the authenticated username
    async fn authenticate(&self) -> Result<String>;

    /// Look up a project by its `<namespace>/<name>` path
    async fn resolve_project(&self, path: &str) -> Result<Project>;

    /// Look up a user by username; exactly one account must match
    async fn resolve_user(&self, username: &str) -> Result<User>;

    /// Open a merge request in `project`
    async fn create_merge_request(
        &self,
        project: &Project,
        request: &NewMergeRequest,
    ) -> Result<MergeRequest>;
}

//! Review gateway factory

use crate::config::MergeSettings;
use crate::error::Result;
use crate::platform::{GitLabService, ReviewGateway};

/// Create the review gateway described by the merge settings
pub fn create_review_gateway(settings: &MergeSettings) -> Result<Box<dyn ReviewGateway>> {
    Ok(Box::new(GitLabService::new(
        settings.gitlab_token.clone(),
        &settings.gitlab_host,
    )?))
}

//! Recording review gateway

use async_trait::async_trait;
use coursectl::error::{Error, Result};
use coursectl::platform::ReviewGateway;
use coursectl::types::{MergeRequest, NewMergeRequest, Project, User};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Review gateway that records every call
///
/// Features:
/// - Auto-incrementing merge request iids
/// - Configurable number of users matching the assignee
/// - Error injection for merge request creation
pub struct MockGateway {
    next_iid: AtomicU64,
    user_matches: Mutex<usize>,
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<NewMergeRequest>>,
    create_error: Mutex<Option<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            next_iid: AtomicU64::new(1),
            user_matches: Mutex::new(1),
            calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            create_error: Mutex::new(None),
        }
    }

    /// Number of accounts the assignee lookup returns
    pub fn set_user_matches(&self, matches: usize) {
        *self.user_matches.lock().unwrap() = matches;
    }

    /// Make `create_merge_request` fail
    pub fn fail_create(&self, msg: &str) {
        *self.create_error.lock().unwrap() = Some(msg.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<NewMergeRequest> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ReviewGateway for MockGateway {
    async fn authenticate(&self) -> Result<String> {
        self.record("authenticate".to_string());
        Ok("student".to_string())
    }

    async fn resolve_project(&self, path: &str) -> Result<Project> {
        self.record(format!("resolve_project {path}"));
        Ok(Project {
            id: 7,
            path_with_namespace: path.to_string(),
        })
    }

    async fn resolve_user(&self, username: &str) -> Result<User> {
        self.record(format!("resolve_user {username}"));
        let matches = *self.user_matches.lock().unwrap();
        if matches != 1 {
            return Err(Error::UserResolution {
                username: username.to_string(),
                matches,
            });
        }
        Ok(User {
            id: 99,
            username: username.to_string(),
        })
    }

    async fn create_merge_request(
        &self,
        project: &Project,
        request: &NewMergeRequest,
    ) -> Result<MergeRequest> {
        self.record(format!("create_merge_request {}", project.id));

        if let Some(msg) = self.create_error.lock().unwrap().as_ref() {
            return Err(Error::GitLabApi(msg.clone()));
        }

        self.created.lock().unwrap().push(request.clone());
        let iid = self.next_iid.fetch_add(1, Ordering::SeqCst);
        Ok(MergeRequest {
            iid,
            web_url: format!(
                "https://gitlab.example.com/{}/-/merge_requests/{iid}",
                project.path_with_namespace
            ),
            source_branch: request.source_branch.clone(),
            target_branch: request.target_branch.clone(),
            title: request.title.clone(),
            created_at: None,
        })
    }
}

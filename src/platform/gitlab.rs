//! GitLab review service implementation

use crate::error::{Error, Result};
use crate::platform::ReviewGateway;
use crate::types::{MergeRequest, NewMergeRequest, Project, User};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;
use url::Url;

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    api_base: String,
}

#[derive(serde::Deserialize)]
struct CurrentUser {
    username: String,
}

#[derive(Serialize)]
struct CreateMrPayload<'a> {
    source_branch: &'a str,
    target_branch: &'a str,
    title: &'a str,
    labels: String,
    assignee_id: u64,
}

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl GitLabService {
    /// Create a service for `https://<host>/api/v4`
    pub fn new(token: String, host: &str) -> Result<Self> {
        Self::with_api_base(token, format!("https://{host}/api/v4"))
    }

    /// Create a service against an explicit API base URL
    pub fn with_api_base(token: String, api_base: impl Into<String>) -> Result<Self> {
        let api_base = api_base.into();
        let parsed = Url::parse(&api_base)
            .map_err(|e| Error::Config(format!("Invalid GitLab API URL {api_base}: {e}")))?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            token,
            api_base: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("PRIVATE-TOKEN", &self.token)
    }

    async fn checked(response: Response, action: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!("GitLab responded {status} to {action}: {body}");
        Err(Error::GitLabApi(format!("{action} failed with status {status}: {body}")))
    }
}

#[async_trait]
impl ReviewGateway for GitLabService {
    async fn authenticate(&self) -> Result<String> {
        let response = self
            .authorized(self.client.get(self.api_url("/user")))
            .send()
            .await?;
        let user: CurrentUser = Self::checked(response, "authentication").await?.json().await?;
        debug!("Authenticated to GitLab as {}", user.username);
        Ok(user.username)
    }

    async fn resolve_project(&self, path: &str) -> Result<Project> {
        let url = self.api_url(&format!("/projects/{}", urlencoding::encode(path)));
        let response = self.authorized(self.client.get(&url)).send().await?;
        let project = Self::checked(response, &format!("project lookup for {path}"))
            .await?
            .json()
            .await?;
        Ok(project)
    }

    async fn resolve_user(&self, username: &str) -> Result<User> {
        let response = self
            .authorized(self.client.get(self.api_url("/users")))
            .query(&[("username", username)])
            .send()
            .await?;
        let mut users: Vec<User> = Self::checked(response, &format!("user lookup for {username}"))
            .await?
            .json()
            .await?;

        if users.len() != 1 {
            return Err(Error::UserResolution {
                username: username.to_string(),
                matches: users.len(),
            });
        }
        Ok(users.remove(0))
    }

    async fn create_merge_request(
        &self,
        project: &Project,
        request: &NewMergeRequest,
    ) -> Result<MergeRequest> {
        let url = self.api_url(&format!("/projects/{}/merge_requests", project.id));
        let payload = CreateMrPayload {
            source_branch: &request.source_branch,
            target_branch: &request.target_branch,
            title: &request.title,
            labels: request.labels.join(","),
            assignee_id: request.assignee_id,
        };

        let response = self
            .authorized(self.client.post(&url))
            .json(&payload)
            .send()
            .await?;
        let mr = Self::checked(response, "merge request creation")
            .await?
            .json()
            .await?;
        Ok(mr)
    }
}

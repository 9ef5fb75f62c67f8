//! Core types for coursectl

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Branch every new task branch is created from
pub const BASE_BRANCH: &str = "master";

/// Kind of a task, decided by the course repository layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Task directory carries a build descriptor; solution is C++ code
    Practical,
    /// No build descriptor; solution is a markdown write-up
    Theoretical,
}

impl TaskKind {
    /// File name of the solution inside the task directory
    pub const fn solution_file_name(self) -> &'static str {
        match self {
            Self::Practical => "solution.hpp",
            Self::Theoretical => "solution.md",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Practical => write!(f, "practical"),
            Self::Theoretical => write!(f, "theoretical"),
        }
    }
}

/// A unit of coursework, named `<group>/<name>`
///
/// The name doubles as the git branch name and as the directory under
/// `tasks/` in the course repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Full task name, slashes preserved
    pub name: String,
    /// Practical or theoretical
    pub kind: TaskKind,
}

impl Task {
    /// First path segment, used as the task's category label
    pub fn category(&self) -> &str {
        self.name.split('/').next().unwrap_or(&self.name)
    }

    /// Last path segment
    pub fn leaf(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Solution path relative to the solutions repository root
    pub fn solution_relative_path(&self) -> String {
        format!("{}/{}", self.name, self.kind.solution_file_name())
    }
}

/// Strip leading and trailing separators from a user-supplied task name
pub fn normalize_task_name(raw: &str) -> String {
    raw.trim().trim_matches('/').to_string()
}

/// A project on the review gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Numeric project ID
    pub id: u64,
    /// Namespaced path (`user/repo`)
    pub path_with_namespace: String,
}

/// A user account on the review gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Numeric user ID
    pub id: u64,
    /// Login name
    pub username: String,
}

/// Fields of a merge request to be filed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMergeRequest {
    /// Branch with the solution
    pub source_branch: String,
    /// Branch the solution is merged into
    pub target_branch: String,
    /// Merge request title
    pub title: String,
    /// Labels to attach
    pub labels: Vec<String>,
    /// Reviewer account ID
    pub assignee_id: u64,
}

/// A merge request as returned by the review gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Project-scoped merge request number
    pub iid: u64,
    /// Web URL for the merge request
    pub web_url: String,
    /// Source branch name
    pub source_branch: String,
    /// Target branch name
    pub target_branch: String,
    /// Merge request title
    pub title: String,
    /// Creation time, when reported
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

//! Task lookup in the course repository

use crate::types::{Task, TaskKind};
use std::path::{Path, PathBuf};

/// File whose presence marks a task as practical
pub const BUILD_DESCRIPTOR: &str = "CMakeLists.txt";

const TASKS_DIR: &str = "tasks";
const BUILD_DIR: &str = "build";

/// Maps task names to locations in the course and solutions repositories
#[derive(Debug, Clone)]
pub struct TaskResolver {
    course_repo: PathBuf,
    solutions_repo: PathBuf,
}

impl TaskResolver {
    /// Create a resolver over the two repositories
    pub fn new(course_repo: impl Into<PathBuf>, solutions_repo: impl Into<PathBuf>) -> Self {
        Self {
            course_repo: course_repo.into(),
            solutions_repo: solutions_repo.into(),
        }
    }

    /// `<course repo>/tasks/<task>`
    pub fn task_dir(&self, name: &str) -> PathBuf {
        self.course_repo.join(TASKS_DIR).join(name)
    }

    /// `<course repo>/tasks/<task>/build`
    pub fn build_dir(&self, name: &str) -> PathBuf {
        self.task_dir(name).join(BUILD_DIR)
    }

    /// Whether the task directory has a build descriptor
    pub fn is_practical(&self, name: &str) -> bool {
        self.task_dir(name).join(BUILD_DESCRIPTOR).exists()
    }

    /// Whether `name` is `<group>/<name>` and exists under `tasks/`
    ///
    /// Advisory only; `task --force` skips it.
    pub fn validate_name(&self, name: &str) -> bool {
        name.matches('/').count() == 1 && self.task_dir(name).is_dir()
    }

    /// Build a [`Task`] with its kind looked up on disk
    pub fn resolve(&self, name: &str) -> Task {
        let kind = if self.is_practical(name) {
            TaskKind::Practical
        } else {
            TaskKind::Theoretical
        };
        Task {
            name: name.to_string(),
            kind,
        }
    }

    /// Directory holding the task's solution in the solutions repository
    pub fn solution_dir(&self, task: &Task) -> PathBuf {
        self.solutions_repo.join(&task.name)
    }

    /// Absolute path of the task's solution file
    pub fn solution_path(&self, task: &Task) -> PathBuf {
        self.solution_dir(task).join(task.kind.solution_file_name())
    }

    /// Template to copy for a practical task
    ///
    /// An explicit template is taken relative to the task directory (absolute
    /// paths are used as given). Otherwise the conventional
    /// `<leaf with '-' replaced by '_'>.hpp` in the task directory is used.
    pub fn template_path(&self, task: &Task, explicit: Option<&Path>) -> PathBuf {
        let task_dir = self.task_dir(&task.name);
        explicit.map_or_else(
            || task_dir.join(format!("{}.hpp", task.leaf().replace('-', "_"))),
            |template| task_dir.join(template),
        )
    }
}

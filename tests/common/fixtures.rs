//! Temporary course and solutions trees

use crate::common::{MockBuild, MockVcs, ScriptedPrompt};
use coursectl::config::Config;
use coursectl::context::Context;
use coursectl::state::SessionState;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A course repository with a few tasks and an empty solutions directory
///
/// Tasks:
/// - `mutex/spin-lock`: practical, with the default template `spin_lock.hpp`
/// - `futex/condvar`: practical, no template
/// - `theory/cas`: theoretical
pub struct CourseFixture {
    pub root: TempDir,
}

impl CourseFixture {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let tasks = root.path().join("course/tasks");

        fs::create_dir_all(tasks.join("mutex/spin-lock")).unwrap();
        fs::write(tasks.join("mutex/spin-lock/CMakeLists.txt"), "").unwrap();
        fs::write(
            tasks.join("mutex/spin-lock/spin_lock.hpp"),
            "#pragma once\nclass SpinLock {};\n",
        )
        .unwrap();

        fs::create_dir_all(tasks.join("futex/condvar")).unwrap();
        fs::write(tasks.join("futex/condvar/CMakeLists.txt"), "").unwrap();

        fs::create_dir_all(tasks.join("theory/cas")).unwrap();
        fs::create_dir_all(root.path().join("solutions")).unwrap();

        Self { root }
    }

    pub fn solutions(&self) -> PathBuf {
        self.root.path().join("solutions")
    }

    pub fn solution(&self, relative: &str) -> PathBuf {
        self.solutions().join(relative)
    }

    /// Startup keys only
    pub fn base_config(&self) -> Value {
        json!({
            "path_to_repos": self.root.path().to_string_lossy(),
            "course_repo_name": "course",
        })
    }

    /// Startup keys plus every merge key
    pub fn merge_config(&self) -> Value {
        let mut config = self.base_config();
        let extra = json!({
            "group_number": 596,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "gitlab_token": "glpat-test",
            "assignee_username": "reviewer",
            "gitlab_repo_user": "ada",
        });
        merge_into(&mut config, extra);
        config
    }

    pub fn config(&self, value: &Value) -> Config {
        Config::parse(Path::new("config.json"), &value.to_string()).unwrap()
    }

    /// Context over this fixture with the given fakes and an empty state
    pub fn context(
        &self,
        config: &Value,
        vcs: &Arc<MockVcs>,
        build: &Arc<MockBuild>,
        prompt: &Arc<ScriptedPrompt>,
    ) -> Context {
        self.context_with_state(config, SessionState::default(), vcs, build, prompt)
    }

    pub fn context_with_state(
        &self,
        config: &Value,
        state: SessionState,
        vcs: &Arc<MockVcs>,
        build: &Arc<MockBuild>,
        prompt: &Arc<ScriptedPrompt>,
    ) -> Context {
        Context::new(
            self.config(config),
            state,
            vcs.clone(),
            build.clone(),
            prompt.clone(),
        )
    }
}

/// Overlay the keys of `extra` onto `base`
pub fn merge_into(base: &mut Value, extra: Value) {
    if let (Value::Object(base), Value::Object(extra)) = (base, extra) {
        base.extend(extra);
    }
}

/// Session state with an active task
pub fn state_with_task(task: &str) -> SessionState {
    SessionState {
        current_task: task.to_string(),
        merged_tasks: Vec::new(),
    }
}

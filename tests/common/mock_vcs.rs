//! In-memory version control gateway
//!
//! Models branches, a current branch, and a working tree where files are
//! either dirty (edited), staged, or committed. Every call is logged in git
//! command form so tests can assert on the exact sequence.

use async_trait::async_trait;
use coursectl::error::{Error, Result};
use coursectl::types::BASE_BRANCH;
use coursectl::vcs::VcsGateway;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Mutex;

pub struct MockVcs {
    branches: Mutex<BTreeSet<String>>,
    current: Mutex<String>,
    dirty: Mutex<BTreeSet<String>>,
    staged: Mutex<BTreeSet<String>>,
    calls: Mutex<Vec<String>>,
    // Error injection
    checkout_error: Mutex<Option<i32>>,
    commit_error: Mutex<Option<i32>>,
    push_error: Mutex<Option<i32>>,
}

impl MockVcs {
    /// Repository with only the base branch, checked out
    pub fn new() -> Self {
        Self {
            branches: Mutex::new(BTreeSet::from([BASE_BRANCH.to_string()])),
            current: Mutex::new(BASE_BRANCH.to_string()),
            dirty: Mutex::new(BTreeSet::new()),
            staged: Mutex::new(BTreeSet::new()),
            calls: Mutex::new(Vec::new()),
            checkout_error: Mutex::new(None),
            commit_error: Mutex::new(None),
            push_error: Mutex::new(None),
        }
    }

    /// Add an existing branch
    pub fn with_branch(self, name: &str) -> Self {
        self.branches.lock().unwrap().insert(name.to_string());
        self
    }

    /// Mark a file (relative to the repository root) as edited
    pub fn edit(&self, path: &str) {
        self.dirty.lock().unwrap().insert(path.to_string());
    }

    /// Make every checkout fail with `code`
    pub fn fail_checkout(&self, code: i32) {
        *self.checkout_error.lock().unwrap() = Some(code);
    }

    /// Make commit fail with `code`
    pub fn fail_commit(&self, code: i32) {
        *self.commit_error.lock().unwrap() = Some(code);
    }

    /// Make push fail with `code`
    pub fn fail_push(&self, code: i32) {
        *self.push_error.lock().unwrap() = Some(code);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose command starts with `prefix`
    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    pub fn branches(&self) -> BTreeSet<String> {
        self.branches.lock().unwrap().clone()
    }

    pub fn current_branch(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn switch(&self, name: &str) -> Result<()> {
        if let Some(code) = *self.checkout_error.lock().unwrap() {
            return Err(Error::CheckoutFailed(code));
        }
        if !self.branches.lock().unwrap().contains(name) {
            return Err(Error::CheckoutFailed(1));
        }
        *self.current.lock().unwrap() = name.to_string();
        Ok(())
    }
}

fn render(paths: &[&Path]) -> String {
    paths
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

fn under(file: &str, path: &Path) -> bool {
    Path::new(file).starts_with(path)
}

#[async_trait]
impl VcsGateway for MockVcs {
    async fn branch_exists(&self, name: &str) -> Result<bool> {
        Ok(self.branches.lock().unwrap().contains(name))
    }

    async fn checkout(&self, name: &str) -> Result<()> {
        self.record(format!("checkout {name}"));
        self.switch(name)
    }

    async fn create_and_checkout(&self, name: &str) -> Result<()> {
        self.record(format!("checkout {BASE_BRANCH}"));
        self.switch(BASE_BRANCH)?;
        self.record(format!("checkout -b {name}"));
        self.branches.lock().unwrap().insert(name.to_string());
        *self.current.lock().unwrap() = name.to_string();
        Ok(())
    }

    async fn stage(&self, paths: &[&Path]) -> Result<()> {
        self.record(format!("add {}", render(paths)));
        let mut dirty = self.dirty.lock().unwrap();
        let moved: Vec<String> = dirty
            .iter()
            .filter(|f| paths.iter().any(|p| under(f, p)))
            .cloned()
            .collect();
        for file in moved {
            dirty.remove(&file);
            self.staged.lock().unwrap().insert(file);
        }
        Ok(())
    }

    async fn staged_changes(&self, path: &Path) -> Result<Vec<String>> {
        Ok(self
            .staged
            .lock()
            .unwrap()
            .iter()
            .filter(|f| under(f, path))
            .cloned()
            .collect())
    }

    async fn commit(&self, paths: &[&Path], message: &str) -> Result<()> {
        self.record(format!("commit -m {message} -- {}", render(paths)));
        if let Some(code) = *self.commit_error.lock().unwrap() {
            return Err(Error::CommitFailed(code));
        }
        self.staged
            .lock()
            .unwrap()
            .retain(|f| !paths.iter().any(|p| under(f, p)));
        Ok(())
    }

    async fn push(&self, branch: &str) -> Result<()> {
        self.record(format!("push --set-upstream origin {branch}"));
        match *self.push_error.lock().unwrap() {
            Some(code) => Err(Error::PushFailed(code)),
            None => Ok(()),
        }
    }

    async fn pull(&self) -> Result<()> {
        self.record("pull".to_string());
        Ok(())
    }
}

//! Recording build system

use async_trait::async_trait;
use coursectl::build::BuildSystem;
use coursectl::error::Result;
use std::sync::Mutex;

pub struct MockBuild {
    exit_code: Mutex<i32>,
    calls: Mutex<Vec<String>>,
}

impl MockBuild {
    /// Build whose targets all succeed
    pub fn passing() -> Self {
        Self::exiting_with(0)
    }

    /// Build whose targets exit with `code`
    pub fn exiting_with(code: i32) -> Self {
        Self {
            exit_code: Mutex::new(code),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BuildSystem for MockBuild {
    async fn configure(&self, task: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("configure {task}"));
        Ok(())
    }

    async fn run_targets(&self, task: &str, targets: &[&str]) -> Result<i32> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("make {} ({task})", targets.join(" ")));
        Ok(*self.exit_code.lock().unwrap())
    }

    async fn clean(&self, task: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("clean {task}"));
        Ok(())
    }
}

//! Session state persistence
//!
//! The state file records the active task and every task a merge request was
//! filed for. It is loaded once at startup and written once when the process
//! exits, including after handled errors and interrupts.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Persisted session state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Active task; empty when none is selected
    #[serde(rename = "task", default)]
    pub current_task: String,
    /// Tasks with a successfully filed merge request, in filing order
    #[serde(default)]
    pub merged_tasks: Vec<String>,
}

impl SessionState {
    /// Load state from `path`, or return the empty state if the file is absent
    ///
    /// A file that exists but does not parse is fatal: continuing with
    /// guessed state could point commands at the wrong branch.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No state file at {}, starting fresh", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|source| Error::CorruptState {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write state to `path` via a temporary file in the same directory
    ///
    /// The rename is atomic, so a crash mid-write leaves the previous state
    /// intact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, self)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;

        debug!("Saved state to {}", path.display());
        Ok(())
    }

    /// Active task, if any
    pub fn active_task(&self) -> Option<&str> {
        if self.current_task.is_empty() {
            None
        } else {
            Some(&self.current_task)
        }
    }

    /// Whether a merge request was already filed for `task`
    pub fn was_merged(&self, task: &str) -> bool {
        self.merged_tasks.iter().any(|t| t == task)
    }

    /// Record a successfully filed merge request
    pub fn record_merge(&mut self, task: &str) {
        self.merged_tasks.push(task.to_string());
    }
}

//! Configuration file and per-tool directory
//!
//! Everything coursectl persists lives in one directory:
//! `$COURSECTL_HOME` when set, otherwise `<config dir>/coursectl`
//! (`~/.config/coursectl` on Linux).
//!
//! - `config.json` - user-edited settings, read once at startup
//! - `state.json` - session state, see [`crate::state`]
//! - `coursectl.log` - command log

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::env;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const APP_NAME: &str = "coursectl";

/// Environment variable overriding the per-tool directory
pub const HOME_ENV: &str = "COURSECTL_HOME";

const CONFIG_FILE: &str = "config.json";
const STATE_FILE: &str = "state.json";
const LOG_FILE: &str = "coursectl.log";
const SOLUTIONS_DIR: &str = "solutions";
const DEFAULT_GITLAB_HOST: &str = "gitlab.com";

/// Resolve the per-tool directory (not created)
pub fn app_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
}

/// Path of the configuration file inside `dir`
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Path of the session state file inside `dir`
pub fn state_path(dir: &Path) -> PathBuf {
    dir.join(STATE_FILE)
}

/// Path of the log file inside `dir`
pub fn log_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE)
}

#[derive(Deserialize, Default)]
struct RawConfig {
    path_to_repos: Option<String>,
    course_repo_name: Option<String>,
    group_number: Option<Value>,
    first_name: Option<String>,
    last_name: Option<String>,
    gitlab_token: Option<String>,
    assignee_username: Option<String>,
    gitlab_repo_user: Option<String>,
    gitlab_repo_name: Option<String>,
    test_before_merge: Option<bool>,
    gitlab_host: Option<String>,
}

/// Loaded configuration
pub struct Config {
    /// Student's solutions repository (`<path_to_repos>/solutions`)
    pub solutions_repo: PathBuf,
    /// Read-only course repository (`<path_to_repos>/<course_repo_name>`)
    pub course_repo: PathBuf,
    raw: RawConfig,
    entries: Map<String, Value>,
}

impl Config {
    /// Load the configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::ConfigMissing(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(path, &content)
    }

    /// Parse configuration text; `path` is only used for error messages
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let malformed = |source| Error::ConfigMalformed {
            path: path.to_path_buf(),
            source,
        };

        let entries: Map<String, Value> = serde_json::from_str(content).map_err(malformed)?;
        let raw: RawConfig =
            serde_json::from_value(Value::Object(entries.clone())).map_err(malformed)?;

        let repos = raw
            .path_to_repos
            .as_deref()
            .ok_or_else(|| Error::MissingConfigKey("path_to_repos".to_string()))?;
        let course_repo_name = raw
            .course_repo_name
            .as_deref()
            .ok_or_else(|| Error::MissingConfigKey("course_repo_name".to_string()))?;

        let repos = expand_path(repos);
        Ok(Self {
            solutions_repo: repos.join(SOLUTIONS_DIR),
            course_repo: repos.join(course_repo_name),
            raw,
            entries,
        })
    }

    /// All configuration entries, sorted by key
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Resolve the keys needed to file a merge request
    ///
    /// Keys are checked in a fixed order and the first missing one is
    /// reported.
    pub fn merge_settings(&self) -> Result<MergeSettings> {
        fn required<T: Clone>(value: Option<&T>, key: &str) -> Result<T> {
            value
                .cloned()
                .ok_or_else(|| Error::MissingConfigKey(key.to_string()))
        }

        let group_number = match required(self.raw.group_number.as_ref(), "group_number")? {
            Value::String(s) => s,
            other => other.to_string(),
        };
        let first_name = required(self.raw.first_name.as_ref(), "first_name")?;
        let last_name = required(self.raw.last_name.as_ref(), "last_name")?;
        let gitlab_token = required(self.raw.gitlab_token.as_ref(), "gitlab_token")?;
        let assignee_username =
            required(self.raw.assignee_username.as_ref(), "assignee_username")?;
        let gitlab_repo_user = required(self.raw.gitlab_repo_user.as_ref(), "gitlab_repo_user")?;

        let gitlab_repo_name = self
            .raw
            .gitlab_repo_name
            .clone()
            .unwrap_or_else(|| format!("{group_number}-{first_name}-{last_name}"));
        let gitlab_host = self
            .raw
            .gitlab_host
            .clone()
            .or_else(|| env::var("GITLAB_HOST").ok())
            .unwrap_or_else(|| DEFAULT_GITLAB_HOST.to_string());

        Ok(MergeSettings {
            group_number,
            first_name,
            last_name,
            gitlab_token,
            assignee_username,
            gitlab_repo_user,
            gitlab_repo_name,
            gitlab_host,
            test_before_merge: self.raw.test_before_merge,
        })
    }
}

/// Settings required by the merge command
#[derive(Clone)]
pub struct MergeSettings {
    /// Student group number
    pub group_number: String,
    /// Student first name
    pub first_name: String,
    /// Student last name
    pub last_name: String,
    /// GitLab personal access token
    pub gitlab_token: String,
    /// Reviewer username
    pub assignee_username: String,
    /// Owner of the solutions project on GitLab
    pub gitlab_repo_user: String,
    /// Name of the solutions project on GitLab
    pub gitlab_repo_name: String,
    /// GitLab host
    pub gitlab_host: String,
    /// Whether to run tests before filing; `None` when not configured
    pub test_before_merge: Option<bool>,
}

impl MergeSettings {
    /// `<user>/<repo>` path of the solutions project
    pub fn project_path(&self) -> String {
        format!("{}/{}", self.gitlab_repo_user, self.gitlab_repo_name)
    }
}

impl fmt::Debug for MergeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeSettings")
            .field("group_number", &self.group_number)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("gitlab_token", &"<redacted>")
            .field("assignee_username", &self.assignee_username)
            .field("gitlab_repo_user", &self.gitlab_repo_user)
            .field("gitlab_repo_name", &self.gitlab_repo_name)
            .field("gitlab_host", &self.gitlab_host)
            .field("test_before_merge", &self.test_before_merge)
            .finish()
    }
}

/// Expand a leading `~` and `$VAR` / `${VAR}` references
///
/// Unset variables are left untouched.
pub fn expand_path(raw: &str) -> PathBuf {
    static VAR: OnceLock<Regex> = OnceLock::new();
    let re = VAR.get_or_init(|| {
        Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
            .expect("hardcoded variable pattern is valid")
    });

    let expanded = re.replace_all(raw, |caps: &Captures<'_>| {
        let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        env::var(name).unwrap_or_else(|_| caps[0].to_string())
    });

    if let Some(home) = dirs::home_dir() {
        if expanded == "~" {
            return home;
        }
        if let Some(rest) = expanded.strip_prefix("~/") {
            return home.join(rest);
        }
    }
    PathBuf::from(expanded.into_owned())
}

//! Error types for coursectl

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by coursectl operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file does not exist
    #[error(
        "Configuration file does not exist. Create configuration file {} before starting the application",
        .0.display()
    )]
    ConfigMissing(PathBuf),

    /// Configuration file is not valid JSON or has wrong value types
    #[error("Malformed configuration file {}: JSON format expected", path.display())]
    ConfigMalformed {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A required configuration key is absent
    #[error("Key \"{0}\" is missing in configuration file")]
    MissingConfigKey(String),

    /// Other configuration problem (unresolvable directory, missing tool)
    #[error("{0}")]
    Config(String),

    /// Persisted state cannot be parsed
    #[error("Malformed state file {}: JSON format expected", path.display())]
    CorruptState {
        /// Path to the state file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Task name does not follow the `<group>/<name>` convention
    #[error("{0} is not a valid task name")]
    InvalidTaskName(String),

    /// No task is currently selected
    #[error("No task selected. Specify current task using\n\tcoursectl task <task_name>")]
    NoActiveTask,

    /// The configured active task could not be checked out
    #[error("{0} is a configured task but checkout failed")]
    ActiveTaskCheckoutFailed(String),

    /// Solution template file is missing
    #[error("Solution template {} not found for task {task}", template.display())]
    TemplateNotFound {
        /// Task being scaffolded
        task: String,
        /// Template path that was looked up
        template: PathBuf,
    },

    /// `git checkout` exited non-zero
    #[error("Checkout failed with exit code {0}")]
    CheckoutFailed(i32),

    /// `git commit` exited non-zero
    #[error("Commit failed with exit code {0}")]
    CommitFailed(i32),

    /// `git push` exited non-zero
    #[error("Push failed with exit code {0}")]
    PushFailed(i32),

    /// `git pull` exited non-zero
    #[error("Pull failed with exit code {0}")]
    PullFailed(i32),

    /// Git could not be run or the repository is unusable
    #[error("git {command} failed: {message}")]
    Git {
        /// Git subcommand that failed
        command: String,
        /// Captured diagnostic output
        message: String,
    },

    /// Test suite exited non-zero
    #[error("Testing failed with exit code {0}")]
    TestsFailed(i32),

    /// A build-system invocation exited non-zero
    #[error("{command} failed with exit code {code}")]
    BuildFailed {
        /// Command that failed
        command: String,
        /// Exit code
        code: i32,
    },

    /// GitLab API error
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// Assignee username did not resolve to exactly one account
    #[error("Username {username} resolved to {matches} accounts, expected exactly one")]
    UserResolution {
        /// Username looked up
        username: String,
        /// Number of accounts found
        matches: usize,
    },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// User declined a confirmation prompt
    #[error("Cancelled by user")]
    Cancelled,

    /// User pressed Ctrl-C while a prompt had the terminal in raw mode
    #[error("Interrupted by user")]
    Interrupted,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Process exit code for this error
    ///
    /// Version-control, build, and test failures surface the exit code of the
    /// underlying process. An interrupt exits cleanly. Everything else exits
    /// with 1.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Interrupted => 0,
            Self::CheckoutFailed(code)
            | Self::CommitFailed(code)
            | Self::PushFailed(code)
            | Self::PullFailed(code)
            | Self::TestsFailed(code)
            | Self::BuildFailed { code, .. }
                if *code != 0 =>
            {
                *code
            }
            _ => 1,
        }
    }

    /// Whether this error is an explicit user decline rather than a failure
    pub const fn is_user_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether the user interrupted the program
    pub const fn is_interrupt(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

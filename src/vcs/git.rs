//! Git gateway backed by the `git` executable

use crate::error::{Error, Result};
use crate::types::BASE_BRANCH;
use crate::vcs::VcsGateway;
use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// How a git invocation's output is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    /// stdout to the terminal; stderr to the terminal only when verbose
    Passthrough,
    /// Capture both streams
    Capture,
}

/// Result of one git invocation
#[derive(Debug)]
struct GitOutput {
    success: bool,
    code: i32,
    stdout: String,
    stderr: String,
}

/// Git gateway that spawns `git` in a fixed working directory
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
    verbose: bool,
}

impl GitCli {
    /// Create a gateway for the repository at `workdir`
    ///
    /// When `verbose` is false, git's stderr is suppressed.
    pub fn new(workdir: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            workdir: workdir.into(),
            verbose,
        }
    }

    async fn run<I, S>(&self, args: I, mode: OutputMode) -> Result<GitOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let rendered = args
            .iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        let subcommand = args
            .first()
            .map(|a| a.to_string_lossy().into_owned())
            .unwrap_or_default();

        info!("git {rendered}");
        debug!("run(git {:?}, cwd={})", args, self.workdir.display());

        let mut cmd = Command::new("git");
        cmd.args(&args).current_dir(&self.workdir).stdin(Stdio::null());
        match mode {
            OutputMode::Passthrough => {
                cmd.stdout(Stdio::inherit());
                cmd.stderr(if self.verbose {
                    Stdio::inherit()
                } else {
                    Stdio::null()
                });
            }
            OutputMode::Capture => {
                cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
            }
        }

        let output = cmd.output().await.map_err(|e| Error::Git {
            command: subcommand,
            message: e.to_string(),
        })?;

        let result = GitOutput {
            success: output.status.success(),
            code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        };
        debug!("git {rendered} exited with {}", result.code);
        Ok(result)
    }

    async fn checkout_branch(&self, args: &[&str]) -> Result<()> {
        let out = self.run(args, OutputMode::Passthrough).await?;
        if out.success {
            Ok(())
        } else {
            Err(Error::CheckoutFailed(out.code))
        }
    }
}

fn path_args<'a>(head: &[&'a str], paths: &[&'a Path]) -> Vec<&'a OsStr> {
    head.iter()
        .map(|s| OsStr::new(*s))
        .chain(paths.iter().map(|p| p.as_os_str()))
        .collect()
}

#[async_trait]
impl VcsGateway for GitCli {
    async fn branch_exists(&self, name: &str) -> Result<bool> {
        let refname = format!("refs/heads/{name}");
        let out = self
            .run(
                ["rev-parse", "--verify", "--quiet", refname.as_str()],
                OutputMode::Capture,
            )
            .await?;

        match out.code {
            0 => Ok(true),
            1 => Ok(false),
            _ => Err(Error::Git {
                command: "rev-parse".to_string(),
                message: out.stderr,
            }),
        }
    }

    async fn checkout(&self, name: &str) -> Result<()> {
        self.checkout_branch(&["checkout", name]).await
    }

    async fn create_and_checkout(&self, name: &str) -> Result<()> {
        self.checkout_branch(&["checkout", BASE_BRANCH]).await?;
        self.checkout_branch(&["checkout", "-b", name]).await
    }

    async fn stage(&self, paths: &[&Path]) -> Result<()> {
        let out = self
            .run(path_args(&["add", "--"], paths), OutputMode::Capture)
            .await?;
        if out.success {
            Ok(())
        } else if out.stderr.is_empty() {
            Err(Error::Git {
                command: "add".to_string(),
                message: format!("exit code {}", out.code),
            })
        } else {
            Err(Error::Git {
                command: "add".to_string(),
                message: out.stderr,
            })
        }
    }

    async fn staged_changes(&self, path: &Path) -> Result<Vec<String>> {
        let out = self
            .run(
                path_args(&["diff", "--cached", "--name-only", "HEAD", "--"], &[path]),
                OutputMode::Capture,
            )
            .await?;
        if !out.success {
            return Err(Error::Git {
                command: "diff".to_string(),
                message: out.stderr,
            });
        }

        Ok(out
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    async fn commit(&self, paths: &[&Path], message: &str) -> Result<()> {
        let mut args = path_args(&["commit", "-m", message, "--"], paths);
        if paths.is_empty() {
            args.pop();
        }
        let out = self.run(args, OutputMode::Passthrough).await?;
        if out.success {
            Ok(())
        } else {
            Err(Error::CommitFailed(out.code))
        }
    }

    async fn push(&self, branch: &str) -> Result<()> {
        let out = self
            .run(
                ["push", "--set-upstream", "origin", branch],
                OutputMode::Passthrough,
            )
            .await?;
        if out.success {
            Ok(())
        } else {
            Err(Error::PushFailed(out.code))
        }
    }

    async fn pull(&self) -> Result<()> {
        let out = self.run(["pull"], OutputMode::Passthrough).await?;
        if out.success {
            Ok(())
        } else {
            Err(Error::PullFailed(out.code))
        }
    }
}

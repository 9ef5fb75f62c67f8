//! CMake + make adapter

use crate::build::BuildSystem;
use crate::error::{Error, Result};
use crate::task::TaskResolver;
use async_trait::async_trait;
use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Compilers tried in order
const CLANG_CANDIDATES: &[&str] = &["clang++-5.0", "clang++-6.0", "clang++"];

/// Runs `cmake`/`make` in `<course repo>/tasks/<task>/build`
#[derive(Debug, Clone)]
pub struct CMakeBuild {
    resolver: TaskResolver,
}

impl CMakeBuild {
    /// Create an adapter using `resolver` for build directories
    pub const fn new(resolver: TaskResolver) -> Self {
        Self { resolver }
    }

    async fn spawn(program: &str, args: &[OsString], cwd: &Path) -> Result<i32> {
        info!(
            "{program} {}",
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );
        debug!("run({program} {args:?}, cwd={})", cwd.display());

        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .await
            .map_err(|e| Error::Config(format!("Failed to run {program}: {e}")))?;
        Ok(status.code().unwrap_or(1))
    }
}

/// Find the first executable clang++ on `PATH`
fn find_clang() -> Option<PathBuf> {
    find_clang_in(&env::var_os("PATH")?)
}

/// Find the first executable clang++ in the `paths` search list
fn find_clang_in(paths: &OsStr) -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    CLANG_CANDIDATES
        .iter()
        .find_map(|name| which::which_in(name, Some(paths), &cwd).ok())
}

#[async_trait]
impl BuildSystem for CMakeBuild {
    async fn configure(&self, task: &str) -> Result<()> {
        let build_dir = self.resolver.build_dir(task);
        fs::create_dir_all(&build_dir)?;

        let compiler = find_clang()
            .ok_or_else(|| Error::Config("Suitable clang compiler not found".to_string()))?;
        let mut compiler_arg = OsString::from("-DCMAKE_CXX_COMPILER=");
        compiler_arg.push(compiler.as_os_str());

        let code = Self::spawn("cmake", &[OsString::from(".."), compiler_arg], &build_dir).await?;
        if code == 0 {
            Ok(())
        } else {
            Err(Error::BuildFailed {
                command: "cmake".to_string(),
                code,
            })
        }
    }

    async fn run_targets(&self, task: &str, targets: &[&str]) -> Result<i32> {
        let build_dir = self.resolver.build_dir(task);
        if !build_dir.join("Makefile").exists() {
            warn!("No Makefile found. Running build");
            self.configure(task).await?;
        }

        let args: Vec<OsString> = targets.iter().map(OsString::from).collect();
        Self::spawn("make", &args, &build_dir).await
    }

    async fn clean(&self, task: &str) -> Result<()> {
        let build_dir = self.resolver.build_dir(task);
        if !build_dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(&build_dir)? {
            let entry = entry?;
            if entry.file_name() == ".gitignore" {
                continue;
            }
            let path = entry.path();
            let removed = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            // Per-entry failures are reported and skipped
            if let Err(e) = removed {
                warn!("Failed to remove {}: {e}", path.display());
            }
        }
        Ok(())
    }
}

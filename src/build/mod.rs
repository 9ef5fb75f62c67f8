//! Build system seam
//!
//! The lifecycle only needs "run the test suite, get pass/fail"; the CLI also
//! uses it for `build`, `style`, and `clean`.

mod cmake;

pub use cmake::CMakeBuild;

use crate::error::{Error, Result};
use async_trait::async_trait;
use tracing::info;

/// Which tests to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TestFlavor {
    /// Address sanitizer build
    Asan,
    /// Thread sanitizer build
    Tsan,
    /// Unit tests only
    Unit,
    /// Stress tests only
    Stress,
    /// Everything
    #[default]
    All,
}

impl TestFlavor {
    /// Build target running this flavor
    pub const fn target(self) -> &'static str {
        match self {
            Self::Asan => "run_asan_test",
            Self::Tsan => "run_tsan_test",
            Self::Unit => "run_all_unit_tests",
            Self::Stress => "run_all_stress_tests",
            Self::All => "run",
        }
    }
}

/// Target that formats the solution
pub const STYLE_TARGET: &str = "style";

/// Build operations on a task of the course repository
#[async_trait]
pub trait BuildSystem: Send + Sync {
    /// Generate build files for `task`
    async fn configure(&self, task: &str) -> Result<()>;

    /// Build `targets` for `task`, configuring first if needed
    ///
    /// Returns the build tool's exit code.
    async fn run_targets(&self, task: &str, targets: &[&str]) -> Result<i32>;

    /// Remove build outputs for `task`
    async fn clean(&self, task: &str) -> Result<()>;

    /// Run a test flavor; a non-zero exit becomes `TestsFailed` with that code
    async fn run_tests(&self, task: &str, flavor: TestFlavor) -> Result<()> {
        let code = self.run_targets(task, &[flavor.target()]).await?;
        if code == 0 {
            Ok(())
        } else {
            info!("Testing failed with exit code {code}");
            Err(Error::TestsFailed(code))
        }
    }
}

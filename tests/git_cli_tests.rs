//! Git gateway tests against throwaway repositories
//!
//! Skipped when no `git` binary is available.

mod common;

use common::fixtures::state_with_task;
use common::{CourseFixture, MockBuild, ScriptedPrompt};
use coursectl::commit::{CommitOutcome, commit_active_task};
use coursectl::config::Config;
use coursectl::context::Context;
use coursectl::error::Error;
use coursectl::progress::NoopProgress;
use coursectl::state::SessionState;
use coursectl::task::{SelectOptions, select_task};
use coursectl::vcs::{GitCli, VcsGateway};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Turn `solutions` into a repository on `master` with one commit, pushed to
/// a bare `origin.git` next to it
fn init_solutions_repo(solutions: &Path) -> PathBuf {
    let parent = solutions.parent().unwrap();
    let origin = parent.join("origin.git");
    fs::create_dir_all(solutions).unwrap();
    git(parent, &["init", "--bare", "-q", origin.to_str().unwrap()]);

    git(solutions, &["init", "-q"]);
    git(solutions, &["symbolic-ref", "HEAD", "refs/heads/master"]);
    git(solutions, &["config", "user.name", "Test Student"]);
    git(solutions, &["config", "user.email", "student@example.com"]);
    git(solutions, &["config", "commit.gpgsign", "false"]);
    fs::write(solutions.join("README.md"), "solutions\n").unwrap();
    git(solutions, &["add", "README.md"]);
    git(solutions, &["commit", "-q", "-m", "init"]);
    git(solutions, &["remote", "add", "origin", origin.to_str().unwrap()]);
    git(solutions, &["push", "-q", "origin", "master"]);
    origin
}

fn remote_has_branch(origin: &Path, branch: &str) -> bool {
    Command::new("git")
        .args(["rev-parse", "--verify", "--quiet", &format!("refs/heads/{branch}")])
        .current_dir(origin)
        .output()
        .is_ok_and(|o| o.status.success())
}

#[tokio::test]
async fn test_branch_exists() {
    if !git_available() {
        eprintln!("git not found, skipping");
        return;
    }
    let fixture = CourseFixture::new();
    init_solutions_repo(&fixture.solutions());
    let git = GitCli::new(fixture.solutions(), false);

    assert!(git.branch_exists("master").await.unwrap());
    assert!(!git.branch_exists("mutex/spin-lock").await.unwrap());
}

#[tokio::test]
async fn test_checkout_missing_branch_fails_with_code() {
    if !git_available() {
        return;
    }
    let fixture = CourseFixture::new();
    init_solutions_repo(&fixture.solutions());
    let git = GitCli::new(fixture.solutions(), false);

    let err = git.checkout("no/such-branch").await.unwrap_err();
    match err {
        Error::CheckoutFailed(code) => assert_ne!(code, 0),
        other => panic!("expected CheckoutFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_branch_commit_push_roundtrip() {
    if !git_available() {
        return;
    }
    let fixture = CourseFixture::new();
    let origin = init_solutions_repo(&fixture.solutions());
    let git = GitCli::new(fixture.solutions(), false);

    git.create_and_checkout("theory/cas").await.unwrap();
    let solution = fixture.solution("theory/cas/solution.md");
    fs::create_dir_all(solution.parent().unwrap()).unwrap();
    fs::write(&solution, "CAS is a single atomic step\n").unwrap();

    let dir = Path::new("theory/cas");
    git.stage(&[dir]).await.unwrap();
    assert_eq!(
        git.staged_changes(dir).await.unwrap(),
        vec!["theory/cas/solution.md"]
    );

    git.commit(&[dir], "answer").await.unwrap();
    assert!(git.staged_changes(dir).await.unwrap().is_empty());

    git.push("theory/cas").await.unwrap();
    assert!(remote_has_branch(&origin, "theory/cas"));
}

#[tokio::test]
async fn test_select_and_commit_with_real_git() {
    if !git_available() {
        return;
    }
    let fixture = CourseFixture::new();
    let origin = init_solutions_repo(&fixture.solutions());

    let config = Config::parse(
        Path::new("config.json"),
        &fixture.base_config().to_string(),
    )
    .unwrap();
    let mut ctx = Context::new(
        config,
        SessionState::default(),
        Arc::new(GitCli::new(fixture.solutions(), false)),
        Arc::new(MockBuild::passing()),
        Arc::new(ScriptedPrompt::silent()),
    );

    select_task(&mut ctx, "mutex/spin-lock", &SelectOptions::default(), &NoopProgress)
        .await
        .unwrap();
    assert_eq!(ctx.state.current_task, "mutex/spin-lock");
    assert!(remote_has_branch(&origin, "mutex/spin-lock"));

    let outcome = commit_active_task(&ctx, None, &NoopProgress).await.unwrap();
    assert_eq!(outcome, CommitOutcome::UpToDate);

    fs::write(
        fixture.solution("mutex/spin-lock/solution.hpp"),
        "class SpinLock { bool locked_; };\n",
    )
    .unwrap();
    let outcome = commit_active_task(&ctx, None, &NoopProgress).await.unwrap();
    assert_eq!(outcome, CommitOutcome::Committed);

    // Selecting the existing branch again never rewrites the solution
    select_task(
        &mut ctx,
        "mutex/spin-lock",
        &SelectOptions::default(),
        &NoopProgress,
    )
    .await
    .unwrap();
    assert_eq!(
        fs::read_to_string(fixture.solution("mutex/spin-lock/solution.hpp")).unwrap(),
        "class SpinLock { bool locked_; };\n"
    );
}

#[tokio::test]
async fn test_stage_error_carries_git_message() {
    if !git_available() {
        return;
    }
    let fixture = CourseFixture::new();
    init_solutions_repo(&fixture.solutions());
    let git = GitCli::new(fixture.solutions(), false);

    let err = git.stage(&[Path::new("no/such-task")]).await.unwrap_err();
    match err {
        Error::Git { command, message } => {
            assert_eq!(command, "add");
            assert!(message.contains("pathspec"), "unexpected message: {message}");
        }
        other => panic!("expected Git error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_commit_pushes_branch_without_task_dir() {
    if !git_available() {
        return;
    }
    let fixture = CourseFixture::new();
    let origin = init_solutions_repo(&fixture.solutions());
    let solutions = fixture.solutions();
    git(&solutions, &["checkout", "-q", "-b", "mutex/spin-lock"]);
    fs::write(solutions.join("notes.txt"), "todo: spin lock\n").unwrap();
    git(&solutions, &["add", "notes.txt"]);
    git(&solutions, &["commit", "-q", "-m", "notes"]);

    let config = Config::parse(
        Path::new("config.json"),
        &fixture.base_config().to_string(),
    )
    .unwrap();
    let ctx = Context::new(
        config,
        state_with_task("mutex/spin-lock"),
        Arc::new(GitCli::new(solutions, false)),
        Arc::new(MockBuild::passing()),
        Arc::new(ScriptedPrompt::silent()),
    );

    let outcome = commit_active_task(&ctx, None, &NoopProgress).await.unwrap();
    assert_eq!(outcome, CommitOutcome::UpToDate);
    assert!(remote_has_branch(&origin, "mutex/spin-lock"));
}

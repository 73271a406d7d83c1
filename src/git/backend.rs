//! The four git operations a run needs: status, stage, commit, push.
//!
//! [`SystemGit`] shells out to the system `git` binary, inheriting the user's
//! existing git config, SSH agent, and credential store. Arguments are passed
//! directly to the process (no shell), so paths with spaces or shell
//! metacharacters reach git verbatim.

use std::path::{Path, PathBuf};
use std::process::Output;

use async_trait::async_trait;
use git2::Repository;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// Trait for the git operations used by the batch committer.
///
/// This abstraction allows mocking git in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitBackend: Send + Sync {
    /// Porcelain status of every tracked and untracked change, one per line.
    async fn status(&self) -> Result<String, GitError>;

    /// Stage exactly one path.
    async fn stage(&self, path: &str) -> Result<(), GitError>;

    /// Commit the index with a literal message.
    async fn commit(&self, message: &str) -> Result<(), GitError>;

    /// Push `branch` to `remote`.
    async fn push(&self, remote: &str, branch: &str) -> Result<(), GitError>;
}

/// Backend that runs the system `git` binary in a working directory.
#[derive(Debug, Clone)]
pub struct SystemGit {
    workdir: PathBuf,
}

impl SystemGit {
    /// Run every command inside `workdir`.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Locate the enclosing repository starting from `start` and use its
    /// working directory root.
    pub fn discover(start: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(start).map_err(GitError::NotARepository)?;
        let workdir = repo.workdir().ok_or(GitError::BareRepository)?;
        debug!("Using repository root {}", workdir.display());
        Ok(Self::new(workdir))
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run a git command and return its output, or a descriptive error with
    /// the captured stderr.
    async fn run_git(&self, args: &[&str], operation: &'static str) -> Result<Output, GitError> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .await
            .map_err(|source| GitError::SpawnFailed { operation, source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            // git commit reports "nothing to commit" on stdout
            let stderr = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(GitError::CommandFailed {
                operation,
                code: output.status.code(),
                stderr,
            });
        }

        Ok(output)
    }
}

#[async_trait]
impl GitBackend for SystemGit {
    async fn status(&self) -> Result<String, GitError> {
        let output = self
            .run_git(&["status", "--porcelain", "-uall"], "status")
            .await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn stage(&self, path: &str) -> Result<(), GitError> {
        self.run_git(&["add", "--", path], "add").await?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run_git(&["commit", "-m", message], "commit").await?;
        Ok(())
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.run_git(&["push", remote, branch], "push").await?;
        Ok(())
    }
}

/// Check that git is installed and runs.
///
/// Uses the `which` crate for cross-platform executable detection.
pub async fn check_git_installed() -> Result<(), GitError> {
    if which::which("git").is_err() {
        return Err(GitError::NotInstalled);
    }

    let version_check = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(|source| GitError::SpawnFailed {
            operation: "--version",
            source,
        })?;

    if !version_check.status.success() {
        return Err(GitError::NotInstalled);
    }

    Ok(())
}

//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Repository, RepositoryInitOptions, Signature};

use git_chunk_push::{GitBackend, GitError};

/// A call made against [`RecordingGit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Status,
    Stage(String),
    Commit(String),
    Push(String, String),
}

/// In-memory git backend that records every call.
///
/// Returns a canned status report and fails stage or commit for chosen paths.
pub struct RecordingGit {
    status_output: String,
    fail_stage: HashSet<String>,
    fail_commit: HashSet<String>,
    fail_push: bool,
    last_staged: Mutex<Option<String>>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingGit {
    pub fn new(status_output: impl Into<String>) -> Self {
        Self {
            status_output: status_output.into(),
            fail_stage: HashSet::new(),
            fail_commit: HashSet::new(),
            fail_push: false,
            last_staged: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Build a status report of `n` untracked files.
    pub fn with_untracked_files(n: usize) -> Self {
        let output: String = (0..n)
            .map(|i| format!("?? src/module{}.ts\n", i))
            .collect();
        Self::new(output)
    }

    pub fn failing_stage(mut self, path: &str) -> Self {
        self.fail_stage.insert(path.to_string());
        self
    }

    pub fn failing_commit(mut self, path: &str) -> Self {
        self.fail_commit.insert(path.to_string());
        self
    }

    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn pushes(&self) -> usize {
        self.count(|c| matches!(c, Call::Push(..)))
    }

    pub fn staged_paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Stage(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn commit_messages(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Commit(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn failure(operation: &'static str, stderr: &str) -> GitError {
    GitError::CommandFailed {
        operation,
        code: Some(1),
        stderr: stderr.to_string(),
    }
}

#[async_trait]
impl GitBackend for RecordingGit {
    async fn status(&self) -> Result<String, GitError> {
        self.record(Call::Status);
        Ok(self.status_output.clone())
    }

    async fn stage(&self, path: &str) -> Result<(), GitError> {
        self.record(Call::Stage(path.to_string()));
        if self.fail_stage.contains(path) {
            return Err(failure("add", "simulated stage failure"));
        }
        *self.last_staged.lock().unwrap() = Some(path.to_string());
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<(), GitError> {
        self.record(Call::Commit(message.to_string()));
        let staged = self.last_staged.lock().unwrap().take();
        if staged.is_some_and(|p| self.fail_commit.contains(&p)) {
            return Err(failure("commit", "simulated commit failure"));
        }
        Ok(())
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.record(Call::Push(remote.to_string(), branch.to_string()));
        if self.fail_push {
            return Err(failure("push", "simulated push failure"));
        }
        Ok(())
    }
}

/// A real git repository on `main` with a bare `origin` remote.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub remote_dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a repository with one initial commit pushed to `origin/main`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let remote_dir = tempfile::tempdir().expect("Failed to create remote dir");

        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Failed to init git repo");

        let mut bare_opts = RepositoryInitOptions::new();
        bare_opts.bare(true).initial_head("main");
        Repository::init_opts(remote_dir.path(), &bare_opts).expect("Failed to init bare repo");

        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
            config.set_bool("commit.gpgsign", false).unwrap();
        }

        repo.remote(
            "origin",
            remote_dir.path().to_str().expect("Invalid remote path"),
        )
        .expect("Failed to add origin remote");

        let test_repo = Self {
            dir,
            remote_dir,
            repo,
        };
        test_repo.initial_commit();
        test_repo.git(&["push", "origin", "main"]);
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn initial_commit(&self) {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        self.write_file(".keep", "");

        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(".keep")).expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        self.repo
            .commit(Some("HEAD"), &sig, &sig, "chore: initial commit", &tree, &[])
            .expect("Failed to create commit");
    }

    /// Write a file relative to the repository root, creating parent dirs.
    pub fn write_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Run the git CLI in the repository and return trimmed stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Commit subjects on HEAD, newest first, excluding the initial commit.
    pub fn subjects(&self) -> Vec<String> {
        self.git(&["log", "--format=%s"])
            .lines()
            .filter(|s| *s != "chore: initial commit")
            .map(str::to_string)
            .collect()
    }

    /// Number of commits on the bare remote's `main`.
    pub fn remote_commit_count(&self) -> usize {
        let remote = Repository::open_bare(self.remote_dir.path()).expect("Failed to open remote");
        let mut revwalk = remote.revwalk().expect("Failed to create revwalk");
        revwalk.push_ref("refs/heads/main").expect("Remote has no main");
        revwalk.count()
    }
}

//! git-chunk-push - commit every changed file on its own, push in batches.
//!
//! # Overview
//!
//! git-chunk-push lists every modified and untracked file in a repository,
//! stages and commits each one individually with a conventional-commit style
//! message (emoji + type inferred from the filename), and pushes the
//! accumulated commits to the remote after every batch and once at the end.

pub mod batch;
pub mod classify;
pub mod config;
pub mod error;
pub mod git;

// Re-export commonly used types
pub use batch::{BatchCommitter, EntryOutcome, EntryStatus, PushRecord, PushTrigger, RunSummary};
pub use classify::{CommitLabel, classify, commit_message};
pub use config::RunConfig;
pub use error::{GitError, RunError, StatusParseError};
pub use git::{ChangeEntry, GitBackend, StatusCode, SystemGit};

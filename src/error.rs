//! Error types for git-chunk-push modules using thiserror.

use thiserror::Error;

/// Errors from invoking the system git binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found. Install git and make sure it is on PATH")]
    NotInstalled,

    #[error("Failed to spawn git {operation}: {source}")]
    SpawnFailed {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with {}: {stderr}",
             code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    CommandFailed {
        operation: &'static str,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Not a git repository: {0}")]
    NotARepository(#[source] git2::Error),

    #[error("Repository has no working directory (bare repositories are not supported)")]
    BareRepository,
}

impl GitError {
    /// Name of the git operation that failed, if the error came from one.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            GitError::SpawnFailed { operation, .. } | GitError::CommandFailed { operation, .. } => {
                Some(*operation)
            }
            _ => None,
        }
    }
}

/// A porcelain status line that does not match `XY <path>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusParseError {
    #[error("Malformed status line: {0:?}")]
    Malformed(String),

    #[error("Unterminated quoted path in status line: {0:?}")]
    UnterminatedQuote(String),

    #[error("Status line has an empty path: {0:?}")]
    EmptyPath(String),
}

/// Errors that stop a run before any file is processed.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to list working tree changes: {0}")]
    Status(#[source] GitError),
}

//! Run configuration: remote, branch, batch size, dry run.
//!
//! Precedence is CLI flag, then environment variable, then built-in default.

use std::env;
use std::num::NonZeroUsize;

use tracing::warn;

/// Default remote pushed to.
pub const DEFAULT_REMOTE: &str = "origin";

/// Default branch pushed.
pub const DEFAULT_BRANCH: &str = "main";

/// Default number of entries between pushes.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(50).expect("50 is non-zero");

/// Environment variable to override the remote.
pub const REMOTE_ENV_VAR: &str = "GIT_CHUNK_PUSH_REMOTE";

/// Environment variable to override the branch.
pub const BRANCH_ENV_VAR: &str = "GIT_CHUNK_PUSH_BRANCH";

/// Environment variable to override the batch size.
pub const BATCH_SIZE_ENV_VAR: &str = "GIT_CHUNK_PUSH_BATCH_SIZE";

/// Configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub remote: String,
    pub branch: String,
    pub batch_size: NonZeroUsize,
    pub dry_run: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            dry_run: false,
        }
    }
}

impl RunConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self {
            remote: string_from_env(REMOTE_ENV_VAR).unwrap_or_else(|| DEFAULT_REMOTE.to_string()),
            branch: string_from_env(BRANCH_ENV_VAR).unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            batch_size: batch_size_from_env(),
            dry_run: false,
        }
    }

    /// Apply explicit overrides (from CLI flags) on top of this config.
    pub fn with_overrides(
        mut self,
        remote: Option<String>,
        branch: Option<String>,
        batch_size: Option<NonZeroUsize>,
        dry_run: bool,
    ) -> Self {
        if let Some(remote) = remote {
            self.remote = remote;
        }
        if let Some(branch) = branch {
            self.branch = branch;
        }
        if let Some(batch_size) = batch_size {
            self.batch_size = batch_size;
        }
        self.dry_run |= dry_run;
        self
    }
}

fn string_from_env(var: &str) -> Option<String> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Get the configured batch size.
///
/// Reads from GIT_CHUNK_PUSH_BATCH_SIZE if set, otherwise uses the default
/// of 50. Logs a warning if the variable is set but is not a positive
/// integer.
fn batch_size_from_env() -> NonZeroUsize {
    match env::var(BATCH_SIZE_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<NonZeroUsize>() {
            Ok(size) => size,
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}",
                    BATCH_SIZE_ENV_VAR, v, DEFAULT_BATCH_SIZE
                );
                DEFAULT_BATCH_SIZE
            }
        },
        _ => DEFAULT_BATCH_SIZE,
    }
}

//! Per-entry and per-push results collected during a run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::CommitLabel;

/// What happened to one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryStatus {
    Committed,
    Failed {
        /// git operation that failed (`add` or `commit`).
        operation: String,
        error: String,
    },
    /// Dry run: nothing was executed.
    Planned,
}

/// Result of processing one change entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryOutcome {
    pub path: String,
    pub label: CommitLabel,
    pub message: String,
    #[serde(flatten)]
    pub status: EntryStatus,
}

impl EntryOutcome {
    pub fn is_committed(&self) -> bool {
        self.status == EntryStatus::Committed
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, EntryStatus::Failed { .. })
    }
}

/// Why a push happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PushTrigger {
    Batch,
    Final,
}

/// One push attempt.
#[derive(Debug, Clone, Serialize)]
pub struct PushRecord {
    pub trigger: PushTrigger,
    /// Entries processed when the push ran.
    pub after_entries: usize,
    pub ok: bool,
    pub error: Option<String>,
}

/// Everything a run did, in order.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub remote: String,
    pub branch: String,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub entries: Vec<EntryOutcome>,
    pub pushes: Vec<PushRecord>,
    /// Status lines that could not be parsed.
    pub anomalies: Vec<String>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn committed(&self) -> usize {
        self.entries.iter().filter(|e| e.is_committed()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.is_failed()).count()
    }

    /// Paths whose stage or commit failed, in processing order.
    pub fn failed_paths(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.is_failed())
            .map(|e| e.path.as_str())
            .collect()
    }

    pub fn failed_pushes(&self) -> usize {
        self.pushes.iter().filter(|p| !p.ok).count()
    }

    /// True when the status query reported nothing to commit.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// One-line human summary.
    pub fn headline(&self) -> String {
        if self.is_clean() {
            return "Working tree clean, nothing committed".to_string();
        }
        if self.dry_run {
            return format!("Dry run: {} commit(s) planned", self.total());
        }

        let mut parts = vec![format!("{} committed", self.committed())];
        if self.failed() > 0 {
            parts.push(format!("{} failed", self.failed()));
        }
        parts.push(format!(
            "{} push(es) to {}/{}",
            self.pushes.len(),
            self.remote,
            self.branch
        ));
        if self.failed_pushes() > 0 {
            parts.push(format!("{} push(es) failed", self.failed_pushes()));
        }
        parts.join(", ")
    }
}

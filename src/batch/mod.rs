//! Batch committer: one commit per changed file, pushing in fixed-size batches.
//!
//! Runs strictly in sequence. Each entry is staged and committed before the
//! next one starts, and a push only ever follows commits issued before it.
//! Failures on individual entries or pushes are recorded and logged; they
//! never stop the run.

pub mod summary;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::classify::{CommitLabel, commit_message_for, explain};
use crate::config::RunConfig;
use crate::error::{GitError, RunError};
use crate::git::{ChangeEntry, GitBackend, StatusReport, parse_status_output};

pub use summary::{EntryOutcome, EntryStatus, PushRecord, PushTrigger, RunSummary};

/// Drives one end-to-end run against a [`GitBackend`].
pub struct BatchCommitter<'a, G: GitBackend + ?Sized> {
    git: &'a G,
    config: &'a RunConfig,
}

impl<'a, G: GitBackend + ?Sized> BatchCommitter<'a, G> {
    pub fn new(git: &'a G, config: &'a RunConfig) -> Self {
        Self { git, config }
    }

    /// Query git for every changed path, in reported order.
    ///
    /// Unparseable status lines are logged and returned as anomalies.
    pub async fn list_changes(&self) -> Result<StatusReport, GitError> {
        let output = self.git.status().await?;
        let report = parse_status_output(&output);

        for anomaly in &report.anomalies {
            warn!("Skipping unrecognized status line: {}", anomaly);
        }

        Ok(report)
    }

    /// Stage one path and commit it with its generated message.
    pub async fn commit_one(&self, entry: &ChangeEntry) -> EntryOutcome {
        let (label, message) = plan(entry);
        self.commit_planned(entry, label, message).await
    }

    async fn commit_planned(
        &self,
        entry: &ChangeEntry,
        label: CommitLabel,
        message: String,
    ) -> EntryOutcome {
        let status = match self.stage_and_commit(&entry.path, &message).await {
            Ok(()) => EntryStatus::Committed,
            Err(e) => EntryStatus::Failed {
                operation: e.operation().unwrap_or("git").to_string(),
                error: e.to_string(),
            },
        };

        EntryOutcome {
            path: entry.path.clone(),
            label,
            message,
            status,
        }
    }

    async fn stage_and_commit(&self, path: &str, message: &str) -> Result<(), GitError> {
        self.git.stage(path).await?;
        self.git.commit(message).await
    }

    async fn push(&self, trigger: PushTrigger, after_entries: usize) -> PushRecord {
        match self.git.push(&self.config.remote, &self.config.branch).await {
            Ok(()) => {
                info!(
                    "Pushed to {}/{} after {} entries",
                    self.config.remote, self.config.branch, after_entries
                );
                PushRecord {
                    trigger,
                    after_entries,
                    ok: true,
                    error: None,
                }
            }
            Err(e) => {
                warn!(
                    "Push to {}/{} failed: {}",
                    self.config.remote, self.config.branch, e
                );
                PushRecord {
                    trigger,
                    after_entries,
                    ok: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Run the whole process.
    ///
    /// Returns an error only when the initial status query fails; in that
    /// case nothing is staged, committed or pushed.
    pub async fn run(&self) -> Result<RunSummary, RunError> {
        let started_at = Utc::now();
        let report = self.list_changes().await.map_err(RunError::Status)?;

        let mut summary = RunSummary {
            remote: self.config.remote.clone(),
            branch: self.config.branch.clone(),
            dry_run: self.config.dry_run,
            started_at,
            finished_at: started_at,
            entries: Vec::with_capacity(report.entries.len()),
            pushes: Vec::new(),
            anomalies: report.anomalies.iter().map(|a| a.to_string()).collect(),
        };

        if report.entries.is_empty() {
            println!("✅ No changes detected. Working tree clean.");
            summary.finished_at = Utc::now();
            return Ok(summary);
        }

        let total = report.entries.len();
        println!("📦 Detected {} files to process.", total);

        if self.config.dry_run {
            for (idx, entry) in report.entries.iter().enumerate() {
                let (label, message) = plan(entry);
                println!("[{}/{}] Would commit: {}", idx + 1, total, message);
                summary.entries.push(EntryOutcome {
                    path: entry.path.clone(),
                    label,
                    message,
                    status: EntryStatus::Planned,
                });
            }
            summary.finished_at = Utc::now();
            return Ok(summary);
        }

        let batch_size = self.config.batch_size.get();

        for (idx, entry) in report.entries.iter().enumerate() {
            let processed = idx + 1;
            let (label, message) = plan(entry);

            println!("[{}/{}] Committing: {}", processed, total, message);
            let outcome = self.commit_planned(entry, label, message).await;
            if let EntryStatus::Failed { error, .. } = &outcome.status {
                warn!("Failed to commit {}: {}. Skipping.", entry.path, error);
            }
            summary.entries.push(outcome);

            if processed % batch_size == 0 {
                println!("🔄 Executing batch push ({} files)...", processed);
                let record = self.push(PushTrigger::Batch, processed).await;
                summary.pushes.push(record);
            }
        }

        println!("🚀 Executing final push...");
        let record = self.push(PushTrigger::Final, total).await;
        summary.pushes.push(record);

        summary.finished_at = Utc::now();
        Ok(summary)
    }
}

/// Classify an entry once and build its commit message.
fn plan(entry: &ChangeEntry) -> (CommitLabel, String) {
    let (rule, label) = explain(&entry.path);
    debug!("{} [{}] matched rule '{}'", entry.path, entry.status, rule);
    (label, commit_message_for(label, &entry.path))
}

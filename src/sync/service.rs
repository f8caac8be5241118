//! Sync orchestration
//!
//! Drives one synchronization run: render the snapshot, fetch the remote
//! document, diff by section, and only then authenticate and write. Every
//! terminal state leaves a diagnostic entry in the run log.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::GithubConfig;
use crate::events::EventRecord;

use super::credentials::{GithubAppAuth, TokenIssuer};
use super::diff;
use super::error::SyncError;
use super::remote::{DocumentStore, GithubContentStore};
use super::renderer::{render_document, RenderOptions};

/// Entries kept in the in-memory diagnostics buffer.
const LOG_CAPACITY: usize = 200;

/// Terminal outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncStatus {
    /// No section was added or removed; nothing was written.
    NoOp,
    /// The document did not exist and was created.
    Created,
    /// The document existed and was updated.
    Updated,
}

/// Result of one sync run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    pub status: SyncStatus,
    /// Revision (blob SHA) of the document after the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Browser URL of the mirrored document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Human-readable description of what happened.
    pub message: String,
}

/// Diagnostic entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Error,
}

/// One diagnostic entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub title: String,
    pub details: String,
}

/// Bounded in-memory diagnostics buffer, shared between the orchestrator and
/// the read-only log endpoint. Nothing here is ever persisted.
#[derive(Clone, Default)]
pub struct SyncLog {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
}

impl SyncLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn info(&self, title: impl Into<String>, details: impl Into<String>) {
        self.push(LogKind::Info, title.into(), details.into()).await;
    }

    pub async fn error(&self, title: impl Into<String>, details: impl Into<String>) {
        self.push(LogKind::Error, title.into(), details.into()).await;
    }

    async fn push(&self, kind: LogKind, title: String, details: String) {
        let mut entries = self.entries.write().await;
        if entries.len() >= LOG_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            timestamp: Utc::now(),
            kind,
            title,
            details,
        });
    }

    /// All entries, oldest first.
    pub async fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().await.iter().cloned().collect()
    }
}

/// Orchestrates document synchronization runs.
pub struct SyncService {
    store: Arc<dyn DocumentStore>,
    tokens: Arc<dyn TokenIssuer>,
    log: SyncLog,
    title: String,
}

impl SyncService {
    pub fn new(store: Arc<dyn DocumentStore>, tokens: Arc<dyn TokenIssuer>, log: SyncLog) -> Self {
        Self {
            store,
            tokens,
            log,
            title: RenderOptions::default().title,
        }
    }

    /// Build the production service against the GitHub Contents API.
    pub fn from_github(config: &GithubConfig, log: SyncLog) -> Self {
        Self::new(
            Arc::new(GithubContentStore::new(config)),
            Arc::new(GithubAppAuth::new(config)),
            log,
        )
    }

    /// Run one synchronization pass over the given snapshot.
    ///
    /// Concurrent runs are safe: the write carries the revision observed at
    /// fetch time, so the losing run gets a conflict instead of clobbering.
    pub async fn sync(&self, events: &[EventRecord]) -> Result<SyncOutcome, SyncError> {
        let run_id = Uuid::new_v4();
        tracing::info!("Sync run {} started ({} events)", run_id, events.len());

        match self.run(events).await {
            Ok(outcome) => {
                self.log
                    .info(
                        format!("Sync {}", status_label(outcome.status)),
                        format!("run {}: {}", run_id, outcome.message),
                    )
                    .await;
                tracing::info!("Sync run {} finished: {}", run_id, outcome.message);
                Ok(outcome)
            }
            Err(e) => {
                self.log
                    .error("Sync failed", format!("run {}: {}", run_id, e))
                    .await;
                tracing::error!("Sync run {} failed: {}", run_id, e);
                Err(e)
            }
        }
    }

    async fn run(&self, events: &[EventRecord]) -> Result<SyncOutcome, SyncError> {
        // Rendering
        let options = RenderOptions {
            title: self.title.clone(),
            generated_at: Some(Utc::now()),
        };
        let candidate = render_document(events, &options);

        // Fetching; a missing document is the create state.
        let current = self.store.fetch().await?;
        let previous_text = current.as_ref().map(|d| d.text.as_str()).unwrap_or("");

        // Diffing; a no-op stops the run before any credential is issued.
        let changes = diff::diff(previous_text, &candidate);
        if changes.is_noop() {
            return Ok(SyncOutcome {
                status: SyncStatus::NoOp,
                revision: current.as_ref().map(|d| d.sha.clone()),
                url: current.and_then(|d| d.html_url),
                message: format!("{} is already up to date", self.store.location()),
            });
        }

        // Authenticating
        let token = self.tokens.issue().await?;

        // Writing, conditioned on the fetched revision.
        let expected_sha = current.as_ref().map(|d| d.sha.as_str());
        let message = format!("Update event list ({})", changes.summary());
        let receipt = self
            .store
            .write(&candidate, expected_sha, &message, &token)
            .await?;

        let status = if current.is_some() {
            SyncStatus::Updated
        } else {
            SyncStatus::Created
        };

        Ok(SyncOutcome {
            status,
            revision: Some(receipt.sha),
            url: receipt.html_url,
            message: format!("{} {}: {}", verb_label(status), self.store.location(), changes.summary()),
        })
    }
}

fn status_label(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::NoOp => "no-op",
        SyncStatus::Created => "created",
        SyncStatus::Updated => "updated",
    }
}

fn verb_label(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::NoOp => "left",
        SyncStatus::Created => "created",
        SyncStatus::Updated => "updated",
    }
}

//! Application state management

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::sync::{SyncLog, SyncService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    db: SqlitePool,
    sync_log: SyncLog,
    sync: Option<SyncService>,
}

impl AppState {
    /// Create the application state, wiring the sync service when GitHub
    /// mirroring is configured.
    pub fn new(config: Config, db: SqlitePool) -> Self {
        let sync_log = SyncLog::new();
        let sync = config
            .github
            .as_ref()
            .map(|gh| SyncService::from_github(gh, sync_log.clone()));

        Self::with_sync(config, db, sync_log, sync)
    }

    /// Assemble state from explicit parts. Tests use this to inject a sync
    /// service backed by in-memory doubles.
    pub fn with_sync(
        config: Config,
        db: SqlitePool,
        sync_log: SyncLog,
        sync: Option<SyncService>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                sync_log,
                sync,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the database pool
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    /// Get the sync diagnostics log
    pub fn sync_log(&self) -> &SyncLog {
        &self.inner.sync_log
    }

    /// Get the sync service, if mirroring is configured
    pub fn sync_service(&self) -> Option<&SyncService> {
        self.inner.sync.as_ref()
    }
}

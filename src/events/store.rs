//! Event snapshot persistence
//!
//! Read-only access to the events table. Creation and editing happen in the
//! CRUD layer; the sync engine only ever reads a snapshot.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::Result;

use super::types::EventRecord;

/// Repository for event snapshots
pub struct EventStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventStore<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Load the full event list, archived included, in creation order.
    ///
    /// The renderer applies its own archived filter and date sort; keeping
    /// the snapshot in creation order gives the stable tie-break a defined
    /// meaning.
    pub async fn snapshot(&self) -> Result<Vec<EventRecord>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, prefecture, date, website, description,
                   video_url, latitude, longitude, archived
            FROM events
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_record()).collect()
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: String,
    name: String,
    prefecture: String,
    date: String,
    website: Option<String>,
    description: Option<String>,
    video_url: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    archived: i64,
}

impl EventRow {
    fn into_record(self) -> Result<EventRecord> {
        let date = DateTime::parse_from_rfc3339(&self.date)
            .map_err(|e| {
                crate::error::AppError::Internal(format!(
                    "invalid date for event {}: {}",
                    self.id, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(EventRecord {
            id: self.id,
            name: self.name,
            prefecture: self.prefecture,
            date,
            website: self.website,
            description: self.description,
            video_url: self.video_url,
            latitude: self.latitude,
            longitude: self.longitude,
            archived: self.archived != 0,
        })
    }
}

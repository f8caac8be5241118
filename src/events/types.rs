//! Event data types
//!
//! The snapshot model read by the sync engine. Events are created and edited
//! by the web client through the CRUD layer; this module only describes the
//! shape the engine consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::prefecture::prefecture_coordinates;

/// A catalog event as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Opaque identifier (UUID text in storage).
    pub id: String,
    /// Display name; unique names are assumed by the document differ.
    pub name: String,
    /// One of the 47 prefecture names. Validated at the CRUD boundary;
    /// treated as data here.
    pub prefecture: String,
    /// Event instant, stored UTC and rendered as a JST calendar date.
    pub date: DateTime<Utc>,
    /// Official website, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Free-text description. May contain paragraph breaks and bulleted
    /// sub-lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// External video collection URL.
    #[serde(rename = "videoUrl", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Explicit latitude, overriding the prefecture default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Explicit longitude, overriding the prefecture default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Archived events are kept in storage but excluded from the mirrored
    /// document.
    pub archived: bool,
}

impl EventRecord {
    /// Resolve the coordinates to render for this event.
    ///
    /// Event-supplied coordinates win when both components are present;
    /// otherwise the prefecture table supplies a default. `None` means no
    /// trustworthy position exists and the renderer emits an explicit
    /// "not set" marker instead of `[0, 0]`.
    pub fn effective_coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => prefecture_coordinates(&self.prefecture),
        }
    }
}

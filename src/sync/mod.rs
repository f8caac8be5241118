//! Event-to-document synchronization engine
//!
//! Renders the event catalog into a canonical Markdown document, detects
//! material change by section heading, and mirrors the document into a
//! GitHub repository with revision-conditioned writes.

pub mod credentials;
pub mod diff;
mod error;
pub mod remote;
pub mod renderer;
mod service;

pub use credentials::{AccessToken, GithubAppAuth, TokenIssuer};
pub use diff::ChangeSet;
pub use error::SyncError;
pub use remote::{DocumentStore, GithubContentStore, RemoteDocument, WriteReceipt};
pub use renderer::{render_document, RenderOptions};
pub use service::{LogEntry, LogKind, SyncLog, SyncOutcome, SyncService, SyncStatus};

/// Heading marker shared by the renderer and the change detector. Part of
/// the wire format: changing it breaks every deployed document.
pub const SECTION_MARKER: &str = "## ";

/// Protocol headers sent on every GitHub request.
pub(crate) const GITHUB_ACCEPT: &str = "application/vnd.github+json";
pub(crate) const GITHUB_API_VERSION: &str = "2022-11-28";
pub(crate) const USER_AGENT: &str = concat!("event-map-server/", env!("CARGO_PKG_VERSION"));

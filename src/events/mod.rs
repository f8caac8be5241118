//! Event catalog domain model
//!
//! Event records, the prefecture coordinate table, and snapshot access for
//! the sync engine.

pub mod prefecture;
mod store;
mod types;

pub use prefecture::prefecture_coordinates;
pub use store::EventStore;
pub use types::EventRecord;

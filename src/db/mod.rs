pub mod connection;
pub mod schema;
pub mod payloads;
pub mod patterns;

pub use connection::Database;
pub use payloads::DEFAULT_RANK_LIMIT;

use serde::Serialize;

/// Outcome of one ingest batch: rows newly created vs. rows refreshed in
/// place under the uniqueness invariant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub inserted: usize,
    pub updated: usize,
}

impl IngestSummary {
    pub fn total(&self) -> usize {
        self.inserted + self.updated
    }
}

pub mod builtin;
pub mod file;

pub use builtin::{HackeroneReports, PortswiggerResearch};
pub use file::{load_feed_dir, FeedFile};

use crate::models::Category;

/// A provenance-tagged batch of curated entries.
///
/// Feeds are static suppliers: the store never performs network I/O, so a
/// live feed belongs in a collaborator process that implements this trait
/// and hands the snapshot over for ingestion.
pub trait FeedSource {
    /// Provenance tag recorded on every ingested row.
    fn name(&self) -> &str;

    fn payloads(&self) -> Vec<(Category, String)> {
        Vec::new()
    }

    fn patterns(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// The feeds compiled into the binary, for `arsenal ingest`.
pub fn builtin_feeds() -> Vec<Box<dyn FeedSource>> {
    vec![Box::new(PortswiggerResearch), Box::new(HackeroneReports)]
}

pub fn builtin_feed(name: &str) -> Option<Box<dyn FeedSource>> {
    builtin_feeds().into_iter().find(|f| f.name() == name)
}

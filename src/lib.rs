//! Adaptive payload intelligence store.
//!
//! `arsenal` keeps a persistent catalogue of attack payloads and
//! vulnerability-detection patterns, ranks payloads by observed
//! effectiveness, and rewrites them for a target's detected technology
//! profile before handing them to testing tools. The store itself never
//! touches the network: feeds are static snapshots, target profiles come
//! from an external analyzer, and outcome classification happens in the
//! testing tools that report back through [`PayloadManager::record_outcome`].

pub mod adapt;
pub mod cli;
pub mod db;
pub mod errors;
pub mod feeds;
pub mod manager;
pub mod models;
pub mod scoring;

pub use db::Database;
pub use errors::ArsenalError;
pub use manager::{IngestReport, PayloadManager};
pub use models::{Category, PatternRecord, PayloadRecord, TechProfile};

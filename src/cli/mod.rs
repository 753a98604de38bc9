pub mod commands;
pub mod ingest;
pub mod payloads;
pub mod record;
pub mod patterns;
pub mod stats;

pub use commands::{Cli, Commands};

use std::path::PathBuf;

use crate::errors::ArsenalError;
use crate::manager::PayloadManager;

/// Open the store named by `--db`, or the per-user default.
pub(crate) fn open_manager(db: Option<&str>) -> Result<PayloadManager, ArsenalError> {
    match db {
        Some(path) => PayloadManager::open(&PathBuf::from(path)),
        None => PayloadManager::open_default(),
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named vulnerability-detection pattern from a curated feed.
///
/// (pattern_name, detection_logic, source) is unique in the store.
/// success_rate is persisted but currently has no update path; it defaults
/// to 0.0 on ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub pattern_name: String,
    pub detection_logic: String,
    pub source: String,
    pub success_rate: f64,
    pub last_updated: DateTime<Utc>,
}

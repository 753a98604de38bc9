use serde::Deserialize;
use std::path::Path;
use tracing::info;

use super::FeedSource;
use crate::errors::ArsenalError;
use crate::models::Category;

/// A curated feed shipped as a YAML file:
///
/// ```yaml
/// source: team-research
/// payloads:
///   - category: sql_injection
///     payload: "' OR 'a'='a'--"
/// patterns:
///   - name: sql_injection
///     detection_logic: boolean blind via response diffing
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FeedFile {
    pub source: String,
    #[serde(default)]
    pub payloads: Vec<FeedPayload>,
    #[serde(default)]
    pub patterns: Vec<FeedPattern>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedPayload {
    pub category: Category,
    pub payload: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedPattern {
    pub name: String,
    pub detection_logic: String,
}

impl FeedSource for FeedFile {
    fn name(&self) -> &str {
        &self.source
    }

    fn payloads(&self) -> Vec<(Category, String)> {
        self.payloads
            .iter()
            .map(|p| (p.category.clone(), p.payload.clone()))
            .collect()
    }

    fn patterns(&self) -> Vec<(String, String)> {
        self.patterns
            .iter()
            .map(|p| (p.name.clone(), p.detection_logic.clone()))
            .collect()
    }
}

/// Load every `*.yaml` feed file under `dir`. A missing directory is not
/// an error — there are simply no file feeds to ingest.
pub fn load_feed_dir(dir: &Path) -> Result<Vec<FeedFile>, ArsenalError> {
    let mut feeds = Vec::new();

    if !dir.exists() {
        return Ok(feeds);
    }

    let pattern = dir.join("*.yaml");
    let pattern_str = pattern.to_string_lossy();

    for entry in glob::glob(&pattern_str)
        .map_err(|e| ArsenalError::Config(format!("Invalid glob pattern: {}", e)))?
    {
        let path = entry.map_err(|e| ArsenalError::Config(format!("Glob error: {}", e)))?;
        let content = std::fs::read_to_string(&path)?;
        let feed: FeedFile = serde_yaml::from_str(&content)?;
        info!(
            source = %feed.source,
            payloads = feed.payloads.len(),
            patterns = feed.patterns.len(),
            "Loaded feed file"
        );
        feeds.push(feed);
    }

    Ok(feeds)
}

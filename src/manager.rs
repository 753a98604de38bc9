//! Facade consumed by testing tools: ranked retrieval with contextual
//! adaptation, idempotent feed ingestion, and outcome reporting.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::adapt;
use crate::db::{Database, IngestSummary, DEFAULT_RANK_LIMIT};
use crate::errors::{with_retry, ArsenalError, RetryConfig};
use crate::feeds::FeedSource;
use crate::models::{Category, TechProfile};

/// Per-feed ingestion result: how many payload and pattern rows were
/// created or refreshed.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub source: String,
    pub payloads: IngestSummary,
    pub patterns: IngestSummary,
}

pub struct PayloadManager {
    db: Database,
    retry: RetryConfig,
}

impl PayloadManager {
    pub fn open(path: &Path) -> Result<Self, ArsenalError> {
        Ok(Self { db: Database::open(path)?, retry: RetryConfig::default() })
    }

    /// Open the per-user default store (`~/.arsenal/payloads.db`).
    pub fn open_default() -> Result<Self, ArsenalError> {
        Ok(Self { db: Database::open_default()?, retry: RetryConfig::default() })
    }

    pub fn in_memory() -> Result<Self, ArsenalError> {
        Ok(Self { db: Database::in_memory()?, retry: RetryConfig::default() })
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Ingest everything a feed supplies. Repeatable: running the same
    /// feed twice leaves the same rows, with refreshed timestamps.
    pub fn ingest(&self, feed: &dyn FeedSource) -> Result<IngestReport, ArsenalError> {
        let source = feed.name().to_string();
        let payloads = self.ingest_payloads(&source, &feed.payloads())?;
        let patterns = self.ingest_patterns(&source, &feed.patterns())?;
        info!(
            source = %source,
            payloads_inserted = payloads.inserted,
            payloads_updated = payloads.updated,
            patterns_inserted = patterns.inserted,
            patterns_updated = patterns.updated,
            "Feed ingested"
        );
        Ok(IngestReport { source, payloads, patterns })
    }

    pub fn ingest_payloads(
        &self,
        source: &str,
        entries: &[(Category, String)],
    ) -> Result<IngestSummary, ArsenalError> {
        if entries.is_empty() {
            return Ok(IngestSummary::default());
        }
        with_retry("ingest_payloads", &self.retry, || {
            self.db.upsert_payloads(source, entries)
        })
    }

    pub fn ingest_patterns(
        &self,
        source: &str,
        entries: &[(String, String)],
    ) -> Result<IngestSummary, ArsenalError> {
        if entries.is_empty() {
            return Ok(IngestSummary::default());
        }
        with_retry("ingest_patterns", &self.retry, || {
            self.db.upsert_patterns(source, entries)
        })
    }

    /// Top-ranked payloads for a category, rewritten for the target's
    /// technology profile. Ranking order is preserved through adaptation;
    /// an unknown category yields an empty list, never an error.
    pub fn contextual_payloads(
        &self,
        category: &Category,
        profile: &TechProfile,
    ) -> Result<Vec<String>, ArsenalError> {
        let ranked = self.db.top_ranked(category, DEFAULT_RANK_LIMIT)?;
        let texts: Vec<String> = ranked.into_iter().map(|r| r.payload).collect();
        let adapted = adapt::adapt_all(&texts, category, profile);
        info!(category = %category, count = adapted.len(), "Contextual payloads served");
        Ok(adapted)
    }

    /// Report one test outcome by payload text. Matches every stored row
    /// with that text (across categories); returns rows touched, zero for
    /// a text the store has never seen.
    pub fn record_outcome(&self, payload: &str, success: bool) -> Result<usize, ArsenalError> {
        let affected = with_retry("record_outcome", &self.retry, || {
            self.db.record_outcome(payload, success)
        })?;
        info!(success, affected, "Outcome recorded");
        Ok(affected)
    }
}

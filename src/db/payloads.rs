use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::connection::db_err;
use super::{Database, IngestSummary};
use crate::errors::ArsenalError;
use crate::models::{Category, PayloadRecord};
use crate::scoring;

/// Default number of ranked payloads handed to a testing tool.
pub const DEFAULT_RANK_LIMIT: usize = 20;

impl Database {
    /// Upsert a batch of (category, payload) entries from one source, in a
    /// single transaction.
    ///
    /// (category, payload, source) is the identity: an existing row only
    /// gets its last_used refreshed, keeping effectiveness and use_count
    /// intact across re-ingestion; a new row starts at the baseline score
    /// with zero uses.
    pub fn upsert_payloads(
        &self,
        source: &str,
        entries: &[(Category, String)],
    ) -> Result<IngestSummary, ArsenalError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn
            .transaction()
            .map_err(|e| db_err("Failed to begin ingest transaction", e))?;

        let now = Utc::now().to_rfc3339();
        let mut summary = IngestSummary::default();

        for (category, payload) in entries {
            let updated = tx
                .execute(
                    "UPDATE payloads SET last_used = ?4 WHERE category = ?1 AND payload = ?2 AND source = ?3",
                    rusqlite::params![category.as_str(), payload, source, now],
                )
                .map_err(|e| db_err("Failed to refresh payload", e))?;

            if updated == 0 {
                tx.execute(
                    "INSERT INTO payloads (category, payload, source, effectiveness, use_count, last_used, created_at) VALUES (?1, ?2, ?3, ?4, 0, NULL, ?5)",
                    rusqlite::params![
                        category.as_str(),
                        payload,
                        source,
                        scoring::BASELINE_EFFECTIVENESS,
                        now
                    ],
                )
                .map_err(|e| db_err("Failed to insert payload", e))?;
                summary.inserted += 1;
            } else {
                summary.updated += 1;
            }
        }

        tx.commit()
            .map_err(|e| db_err("Failed to commit ingest", e))?;
        Ok(summary)
    }

    /// Top-ranked payloads for a category: effectiveness desc, use_count
    /// desc, created_at asc, rowid asc. One row per distinct payload text
    /// (the best-ranked row wins when a text was ingested from several
    /// sources). Unknown category yields an empty vec.
    pub fn top_ranked(
        &self,
        category: &Category,
        limit: usize,
    ) -> Result<Vec<PayloadRecord>, ArsenalError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT category, payload, source, effectiveness, use_count, last_used, created_at FROM payloads WHERE category = ?1 ORDER BY effectiveness DESC, use_count DESC, created_at ASC, id ASC",
            )
            .map_err(|e| db_err("Query failed", e))?;

        let rows = stmt
            .query_map(rusqlite::params![category.as_str()], row_to_payload)
            .map_err(|e| db_err("Query error", e))?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut ranked = Vec::new();
        for row in rows {
            let record = row.map_err(|e| db_err("Row error", e))?;
            if seen.insert(record.payload.clone()) {
                ranked.push(record);
                if ranked.len() == limit {
                    break;
                }
            }
        }
        Ok(ranked)
    }

    /// Apply one reported test outcome to every stored row whose payload
    /// text matches, across categories and sources. Returns the number of
    /// rows touched; an unknown text touches zero rows and is not an error.
    pub fn record_outcome(&self, payload: &str, success: bool) -> Result<usize, ArsenalError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn
            .execute(
                "UPDATE payloads SET effectiveness = effectiveness + ?1, use_count = use_count + 1, last_used = ?2 WHERE payload = ?3",
                rusqlite::params![scoring::outcome_delta(success), Utc::now().to_rfc3339(), payload],
            )
            .map_err(|e| db_err("Failed to record outcome", e))?;
        Ok(affected)
    }

    pub fn get_payload(
        &self,
        category: &Category,
        payload: &str,
        source: &str,
    ) -> Result<Option<PayloadRecord>, ArsenalError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT category, payload, source, effectiveness, use_count, last_used, created_at FROM payloads WHERE category = ?1 AND payload = ?2 AND source = ?3",
            )
            .map_err(|e| db_err("Query failed", e))?;

        match stmt.query_row(
            rusqlite::params![category.as_str(), payload, source],
            row_to_payload,
        ) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(db_err("Query error", e)),
        }
    }

    pub fn payload_count(&self) -> Result<i64, ArsenalError> {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM payloads", [], |row| row.get(0))
            .map_err(|e| db_err("Count failed", e))
    }

    /// Distinct categories with their row counts, alphabetical. Feeds the
    /// stats CLI.
    pub fn payload_counts_by_category(&self) -> Result<Vec<(String, i64)>, ArsenalError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT category, COUNT(*) FROM payloads GROUP BY category ORDER BY category")
            .map_err(|e| db_err("Query failed", e))?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))
            .map_err(|e| db_err("Query error", e))?;

        let mut counts = Vec::new();
        for row in rows {
            counts.push(row.map_err(|e| db_err("Row error", e))?);
        }
        Ok(counts)
    }
}

fn row_to_payload(row: &rusqlite::Row) -> rusqlite::Result<PayloadRecord> {
    let last_used: Option<String> = row.get(5)?;
    Ok(PayloadRecord {
        category: Category::parse(&row.get::<_, String>(0)?),
        payload: row.get(1)?,
        source: row.get(2)?,
        effectiveness: row.get(3)?,
        use_count: row.get(4)?,
        last_used: last_used.as_deref().map(|s| parse_ts(5, s)).transpose()?,
        created_at: parse_ts(6, &row.get::<_, String>(6)?)?,
    })
}

fn parse_ts(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(category: Category, payloads: &[&str]) -> Vec<(Category, String)> {
        payloads
            .iter()
            .map(|p| (category.clone(), p.to_string()))
            .collect()
    }

    #[test]
    fn test_ingest_sets_baseline() {
        let db = Database::in_memory().unwrap();
        db.upsert_payloads("portswigger", &entries(Category::SqlInjection, &["' OR '1'='1'--"]))
            .unwrap();

        let record = db
            .get_payload(&Category::SqlInjection, "' OR '1'='1'--", "portswigger")
            .unwrap()
            .unwrap();
        assert_eq!(record.effectiveness, 1.0);
        assert_eq!(record.use_count, 0);
        assert!(record.last_used.is_none());
    }

    #[test]
    fn test_ingest_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let batch = entries(Category::SqlInjection, &["' OR '1'='1'--", "' UNION SELECT NULL--"]);

        let first = db.upsert_payloads("portswigger", &batch).unwrap();
        assert_eq!(first.inserted, 2);
        assert_eq!(first.updated, 0);

        // Bump state so we can see it survive re-ingestion
        db.record_outcome("' OR '1'='1'--", true).unwrap();

        let second = db.upsert_payloads("portswigger", &batch).unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.updated, 2);
        assert_eq!(db.payload_count().unwrap(), 2);

        let record = db
            .get_payload(&Category::SqlInjection, "' OR '1'='1'--", "portswigger")
            .unwrap()
            .unwrap();
        assert!((record.effectiveness - 1.1).abs() < 1e-9);
        assert_eq!(record.use_count, 1);
        assert!(record.last_used.is_some());
    }

    #[test]
    fn test_same_text_different_source_is_distinct_row() {
        let db = Database::in_memory().unwrap();
        db.upsert_payloads("portswigger", &entries(Category::Xss, &["<svg onload=alert(1)>"]))
            .unwrap();
        db.upsert_payloads("hackerone", &entries(Category::Xss, &["<svg onload=alert(1)>"]))
            .unwrap();
        assert_eq!(db.payload_count().unwrap(), 2);
    }

    #[test]
    fn test_top_ranked_orders_by_effectiveness() {
        let db = Database::in_memory().unwrap();
        db.upsert_payloads("feed", &entries(Category::SqlInjection, &["a", "b", "c"]))
            .unwrap();
        db.record_outcome("b", true).unwrap();
        db.record_outcome("b", true).unwrap();
        db.record_outcome("c", true).unwrap();
        db.record_outcome("a", false).unwrap();

        let ranked = db.top_ranked(&Category::SqlInjection, DEFAULT_RANK_LIMIT).unwrap();
        let texts: Vec<&str> = ranked.iter().map(|r| r.payload.as_str()).collect();
        assert_eq!(texts, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_top_ranked_tie_breaks_on_use_count() {
        let db = Database::in_memory().unwrap();
        db.upsert_payloads("feed", &entries(Category::SqlInjection, &["x", "y"]))
            .unwrap();
        // Both land on 1.2: x via 2 successes (2 uses), y via 3 successes
        // and 2 failures (5 uses). Higher use_count wins the tie.
        db.record_outcome("x", true).unwrap();
        db.record_outcome("x", true).unwrap();
        for _ in 0..3 {
            db.record_outcome("y", true).unwrap();
        }
        db.record_outcome("y", false).unwrap();
        db.record_outcome("y", false).unwrap();

        let x = db.get_payload(&Category::SqlInjection, "x", "feed").unwrap().unwrap();
        let y = db.get_payload(&Category::SqlInjection, "y", "feed").unwrap().unwrap();
        assert!((x.effectiveness - y.effectiveness).abs() < 1e-9);

        let ranked = db.top_ranked(&Category::SqlInjection, 10).unwrap();
        assert_eq!(ranked[0].payload, "y");
        assert_eq!(ranked[1].payload, "x");
    }

    #[test]
    fn test_top_ranked_equal_keys_stable_across_calls() {
        let db = Database::in_memory().unwrap();
        // Fresh rows share effectiveness, use_count and batch timestamp;
        // rowid keeps the order total
        db.upsert_payloads("feed", &entries(Category::SqlInjection, &["a", "b", "c"]))
            .unwrap();

        let first = db.top_ranked(&Category::SqlInjection, 10).unwrap();
        let second = db.top_ranked(&Category::SqlInjection, 10).unwrap();
        assert_eq!(first, second);
        let texts: Vec<&str> = first.iter().map(|r| r.payload.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_top_ranked_unknown_category_is_empty() {
        let db = Database::in_memory().unwrap();
        db.upsert_payloads("feed", &entries(Category::Xss, &["<svg onload=alert(1)>"]))
            .unwrap();
        let ranked = db.top_ranked(&Category::SqlInjection, 10).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_top_ranked_category_isolation() {
        let db = Database::in_memory().unwrap();
        db.upsert_payloads("feed", &entries(Category::SqlInjection, &["'--"]))
            .unwrap();
        db.upsert_payloads("feed", &entries(Category::Xss, &["<svg onload=alert(1)>"]))
            .unwrap();

        let ranked = db.top_ranked(&Category::SqlInjection, 10).unwrap();
        assert_eq!(ranked.len(), 1);
        assert!(ranked.iter().all(|r| r.category == Category::SqlInjection));
    }

    #[test]
    fn test_top_ranked_one_row_per_distinct_text() {
        let db = Database::in_memory().unwrap();
        db.upsert_payloads("portswigger", &entries(Category::Ssrf, &["http://localhost:22"]))
            .unwrap();
        db.upsert_payloads("hackerone", &entries(Category::Ssrf, &["http://localhost:22"]))
            .unwrap();

        let ranked = db.top_ranked(&Category::Ssrf, 10).unwrap();
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_top_ranked_respects_limit() {
        let db = Database::in_memory().unwrap();
        let batch: Vec<(Category, String)> = (0..30)
            .map(|i| (Category::SqlInjection, format!("payload-{}", i)))
            .collect();
        db.upsert_payloads("feed", &batch).unwrap();

        let ranked = db.top_ranked(&Category::SqlInjection, DEFAULT_RANK_LIMIT).unwrap();
        assert_eq!(ranked.len(), 20);
    }

    #[test]
    fn test_record_outcome_scenario() {
        let db = Database::in_memory().unwrap();
        db.upsert_payloads("feed", &entries(Category::SqlInjection, &["'--"]))
            .unwrap();

        db.record_outcome("'--", true).unwrap();
        db.record_outcome("'--", true).unwrap();
        let record = db.get_payload(&Category::SqlInjection, "'--", "feed").unwrap().unwrap();
        assert!((record.effectiveness - 1.2).abs() < 1e-9);
        assert_eq!(record.use_count, 2);

        db.record_outcome("'--", false).unwrap();
        db.record_outcome("'--", false).unwrap();
        db.record_outcome("'--", false).unwrap();
        let record = db.get_payload(&Category::SqlInjection, "'--", "feed").unwrap().unwrap();
        assert!((record.effectiveness - 1.05).abs() < 1e-9);
        assert_eq!(record.use_count, 5);
    }

    #[test]
    fn test_record_outcome_unknown_text_is_noop() {
        let db = Database::in_memory().unwrap();
        let affected = db.record_outcome("never ingested", true).unwrap();
        assert_eq!(affected, 0);
    }

    #[test]
    fn test_record_outcome_matches_across_categories() {
        let db = Database::in_memory().unwrap();
        db.upsert_payloads("feed", &entries(Category::SqlInjection, &["shared"]))
            .unwrap();
        db.upsert_payloads("feed", &entries(Category::Xss, &["shared"]))
            .unwrap();

        let affected = db.record_outcome("shared", true).unwrap();
        assert_eq!(affected, 2);

        let sqli = db.get_payload(&Category::SqlInjection, "shared", "feed").unwrap().unwrap();
        let xss = db.get_payload(&Category::Xss, "shared", "feed").unwrap().unwrap();
        assert!((sqli.effectiveness - 1.1).abs() < 1e-9);
        assert!((xss.effectiveness - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_effectiveness_can_go_negative() {
        let db = Database::in_memory().unwrap();
        db.upsert_payloads("feed", &entries(Category::SqlInjection, &["weak"]))
            .unwrap();
        for _ in 0..21 {
            db.record_outcome("weak", false).unwrap();
        }
        let record = db.get_payload(&Category::SqlInjection, "weak", "feed").unwrap().unwrap();
        assert!(record.effectiveness < 0.0);
    }

    #[test]
    fn test_counts_by_category() {
        let db = Database::in_memory().unwrap();
        db.upsert_payloads("feed", &entries(Category::SqlInjection, &["a", "b"]))
            .unwrap();
        db.upsert_payloads("feed", &entries(Category::Xss, &["c"]))
            .unwrap();

        let counts = db.payload_counts_by_category().unwrap();
        assert_eq!(counts, vec![("sql_injection".to_string(), 2), ("xss".to_string(), 1)]);
    }
}

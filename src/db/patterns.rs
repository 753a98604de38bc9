use chrono::{DateTime, Utc};

use super::connection::db_err;
use super::{Database, IngestSummary};
use crate::errors::ArsenalError;
use crate::models::PatternRecord;

impl Database {
    /// Upsert a batch of (pattern_name, detection_logic) entries from one
    /// source. Same identity contract as payloads: an existing
    /// (pattern_name, detection_logic, source) row only gets last_updated
    /// refreshed.
    pub fn upsert_patterns(
        &self,
        source: &str,
        entries: &[(String, String)],
    ) -> Result<IngestSummary, ArsenalError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn
            .transaction()
            .map_err(|e| db_err("Failed to begin ingest transaction", e))?;

        let now = Utc::now().to_rfc3339();
        let mut summary = IngestSummary::default();

        for (pattern_name, detection_logic) in entries {
            let updated = tx
                .execute(
                    "UPDATE vulnerability_patterns SET last_updated = ?4 WHERE pattern_name = ?1 AND detection_logic = ?2 AND source = ?3",
                    rusqlite::params![pattern_name, detection_logic, source, now],
                )
                .map_err(|e| db_err("Failed to refresh pattern", e))?;

            if updated == 0 {
                tx.execute(
                    "INSERT INTO vulnerability_patterns (pattern_name, detection_logic, source, success_rate, last_updated) VALUES (?1, ?2, ?3, 0.0, ?4)",
                    rusqlite::params![pattern_name, detection_logic, source, now],
                )
                .map_err(|e| db_err("Failed to insert pattern", e))?;
                summary.inserted += 1;
            } else {
                summary.updated += 1;
            }
        }

        tx.commit()
            .map_err(|e| db_err("Failed to commit ingest", e))?;
        Ok(summary)
    }

    /// All patterns under a name, oldest first. Unknown name yields an
    /// empty vec.
    pub fn patterns_by_name(&self, pattern_name: &str) -> Result<Vec<PatternRecord>, ArsenalError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT pattern_name, detection_logic, source, success_rate, last_updated FROM vulnerability_patterns WHERE pattern_name = ?1 ORDER BY id ASC",
            )
            .map_err(|e| db_err("Query failed", e))?;

        let rows = stmt
            .query_map(rusqlite::params![pattern_name], row_to_pattern)
            .map_err(|e| db_err("Query error", e))?;

        let mut patterns = Vec::new();
        for row in rows {
            patterns.push(row.map_err(|e| db_err("Row error", e))?);
        }
        Ok(patterns)
    }

    pub fn pattern_count(&self) -> Result<i64, ArsenalError> {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM vulnerability_patterns", [], |row| row.get(0))
            .map_err(|e| db_err("Count failed", e))
    }
}

fn row_to_pattern(row: &rusqlite::Row) -> rusqlite::Result<PatternRecord> {
    let last_updated: String = row.get(4)?;
    Ok(PatternRecord {
        pattern_name: row.get(0)?,
        detection_logic: row.get(1)?,
        source: row.get(2)?,
        success_rate: row.get(3)?,
        last_updated: DateTime::parse_from_rfc3339(&last_updated)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
    })
}

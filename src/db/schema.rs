pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS payloads (
    id INTEGER PRIMARY KEY,
    category TEXT NOT NULL,
    payload TEXT NOT NULL,
    source TEXT NOT NULL,
    effectiveness REAL NOT NULL DEFAULT 1.0,
    use_count INTEGER NOT NULL DEFAULT 0,
    last_used TEXT,
    created_at TEXT NOT NULL,
    UNIQUE(category, payload, source)
);

CREATE TABLE IF NOT EXISTS vulnerability_patterns (
    id INTEGER PRIMARY KEY,
    pattern_name TEXT NOT NULL,
    detection_logic TEXT NOT NULL,
    source TEXT NOT NULL,
    success_rate REAL NOT NULL DEFAULT 0.0,
    last_updated TEXT NOT NULL,
    UNIQUE(pattern_name, detection_logic, source)
);

";

/// Created only after the column check passes, so an incompatible
/// pre-existing table reports a schema error instead of a failed index.
pub const CREATE_INDEXES: &str = "
CREATE INDEX IF NOT EXISTS idx_payloads_category ON payloads(category);
CREATE INDEX IF NOT EXISTS idx_patterns_name ON vulnerability_patterns(pattern_name);
";

/// Columns every compatible store must carry. A pre-existing table missing
/// any of these is surfaced as a schema error, never migrated.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (
        "payloads",
        &[
            "category",
            "payload",
            "source",
            "effectiveness",
            "use_count",
            "last_used",
            "created_at",
        ],
    ),
    (
        "vulnerability_patterns",
        &[
            "pattern_name",
            "detection_logic",
            "source",
            "success_rate",
            "last_updated",
        ],
    ),
];

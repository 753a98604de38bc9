use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification tag for a payload or vulnerability class.
///
/// The curated feeds ship sql_injection/xss/ssrf sets; tags outside that
/// set are preserved verbatim so a feed can extend the taxonomy without a
/// schema change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    SqlInjection,
    Xss,
    Ssrf,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SqlInjection => "sql_injection",
            Self::Xss => "xss",
            Self::Ssrf => "ssrf",
            Self::Other(tag) => tag,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "sql_injection" => Self::SqlInjection,
            "xss" => Self::Xss,
            "ssrf" => Self::Ssrf,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::parse(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> String {
        c.as_str().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored attack payload with its ranking state.
///
/// (category, payload, source) is unique in the store; re-ingestion updates
/// the existing row in place. Effectiveness is a relative ranking score with
/// no bounds, mutated only by outcome reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadRecord {
    pub category: Category,
    pub payload: String,
    pub source: String,
    pub effectiveness: f64,
    pub use_count: i64,
    pub last_used: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

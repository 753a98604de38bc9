use console::style;

use super::commands::StatsArgs;
use crate::db::Database;
use crate::errors::ArsenalError;

pub fn handle_stats(db: Option<&str>, args: StatsArgs) -> Result<(), ArsenalError> {
    let manager = super::open_manager(db)?;
    let database = manager.database();

    let payloads = database.payload_count()?;
    let patterns = database.pattern_count()?;
    let by_category = database.payload_counts_by_category()?;
    let store_path = match db {
        Some(path) => path.to_string(),
        None => Database::default_path()?.display().to_string(),
    };

    if args.json {
        let stats = serde_json::json!({
            "store": store_path,
            "payloads": payloads,
            "patterns": patterns,
            "categories": by_category.iter().map(|(c, n)| serde_json::json!({"category": c, "count": n})).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{} {}", style("store:").bold(), store_path);
    println!("{} {}", style("payloads:").bold(), payloads);
    for (category, count) in &by_category {
        println!("  {:<16} {}", category, count);
    }
    println!("{} {}", style("patterns:").bold(), patterns);
    println!(
        "{} {}",
        style("build:").dim(),
        option_env!("BUILD_TIMESTAMP").unwrap_or("unknown")
    );
    Ok(())
}

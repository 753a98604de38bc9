use console::style;

use super::commands::PayloadsArgs;
use crate::adapt;
use crate::errors::ArsenalError;
use crate::models::{Category, TechProfile};

pub fn handle_payloads(db: Option<&str>, args: PayloadsArgs) -> Result<(), ArsenalError> {
    let manager = super::open_manager(db)?;
    let category = Category::parse(&args.category);
    let profile = TechProfile {
        database: args.database,
        framework: args.framework,
        cms: args.cms,
        server: args.server,
    };

    let ranked = manager.database().top_ranked(&category, args.limit)?;

    if args.json {
        let adapted: Vec<String> = ranked
            .iter()
            .map(|r| adapt::adapt(&r.payload, &category, &profile))
            .collect();
        println!("{}", serde_json::to_string_pretty(&adapted)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("No payloads stored for category '{}'", category);
        return Ok(());
    }

    println!(
        "{:>7}  {:>5}  {}",
        style("score").dim(),
        style("uses").dim(),
        style("payload").dim()
    );
    for record in &ranked {
        println!(
            "{:>7.2}  {:>5}  {}",
            record.effectiveness,
            record.use_count,
            adapt::adapt(&record.payload, &category, &profile)
        );
    }
    Ok(())
}

use console::style;

use super::commands::PatternsArgs;
use crate::errors::ArsenalError;

pub fn handle_patterns(db: Option<&str>, args: PatternsArgs) -> Result<(), ArsenalError> {
    let manager = super::open_manager(db)?;
    let patterns = manager.database().patterns_by_name(&args.name)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&patterns)?);
        return Ok(());
    }

    if patterns.is_empty() {
        println!("No patterns stored under '{}'", args.name);
        return Ok(());
    }

    for pattern in &patterns {
        println!(
            "{} [{}] {}",
            style(&pattern.pattern_name).cyan().bold(),
            pattern.source,
            pattern.detection_logic
        );
    }
    Ok(())
}

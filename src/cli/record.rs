use console::style;

use super::commands::RecordArgs;
use crate::errors::ArsenalError;

pub fn handle_record(db: Option<&str>, args: RecordArgs) -> Result<(), ArsenalError> {
    let manager = super::open_manager(db)?;
    let success = args.success && !args.failed;

    let affected = manager.record_outcome(&args.payload, success)?;
    if affected == 0 {
        println!(
            "{} payload is not in the store; nothing updated",
            style("warning:").yellow().bold()
        );
    } else {
        println!(
            "Updated {} row{}",
            affected,
            if affected == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

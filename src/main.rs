use arsenal::cli::{self, Cli, Commands};
use arsenal::errors::ArsenalError;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    let db = cli.db.as_deref();
    let result = match cli.command {
        Commands::Ingest(args) => cli::ingest::handle_ingest(db, args),
        Commands::Payloads(args) => cli::payloads::handle_payloads(db, args),
        Commands::Record(args) => cli::record::handle_record(db, args),
        Commands::Patterns(args) => cli::patterns::handle_patterns(db, args),
        Commands::Stats(args) => cli::stats::handle_stats(db, args),
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                ArsenalError::Config(_) => 2,
                ArsenalError::Schema(_) => 3,
                ArsenalError::Storage(_) | ArsenalError::Busy(_) => 4,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arsenal", version, about = "Adaptive payload intelligence store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the payload store (defaults to ~/.arsenal/payloads.db)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest curated feeds into the store
    Ingest(IngestArgs),
    /// Show top-ranked payloads for a category, adapted to a target profile
    Payloads(PayloadsArgs),
    /// Report a test outcome for a payload
    Record(RecordArgs),
    /// Look up vulnerability-detection patterns by name
    Patterns(PatternsArgs),
    /// Show store statistics
    Stats(StatsArgs),
}

#[derive(Args, Clone)]
pub struct IngestArgs {
    /// Builtin feed to ingest: portswigger, hackerone, or all
    #[arg(long, default_value = "all")]
    pub feed: String,

    /// Directory of YAML feed files to ingest as well
    #[arg(long)]
    pub dir: Option<String>,
}

#[derive(Args, Clone)]
pub struct PayloadsArgs {
    /// Payload category (e.g. sql_injection, xss, ssrf)
    #[arg(short, long)]
    pub category: String,

    /// Detected database engine (e.g. mysql, oracle, postgresql)
    #[arg(long)]
    pub database: Option<String>,

    /// Detected frontend framework (e.g. react, angular, vue)
    #[arg(long)]
    pub framework: Option<String>,

    /// Detected CMS
    #[arg(long)]
    pub cms: Option<String>,

    /// Detected server software
    #[arg(long)]
    pub server: Option<String>,

    /// Maximum number of payloads to return
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Emit the adapted payload list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
#[command(group(clap::ArgGroup::new("outcome").required(true)))]
pub struct RecordArgs {
    /// Payload text, exactly as it was served
    #[arg(short, long)]
    pub payload: String,

    /// The payload produced a confirmed finding
    #[arg(long, group = "outcome")]
    pub success: bool,

    /// The payload did not produce a finding
    #[arg(long, group = "outcome")]
    pub failed: bool,
}

#[derive(Args, Clone)]
pub struct PatternsArgs {
    /// Pattern name to look up (e.g. sql_injection)
    #[arg(short, long)]
    pub name: String,

    /// Emit matching patterns as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct StatsArgs {
    /// Emit statistics as JSON
    #[arg(long)]
    pub json: bool,
}

//! ddss-inventory CLI
//!
//! One-shot Splunk DDSS bucket inventory.

use clap::Parser;
use ddss_cli_common::{format_bytes, format_count, format_duration, init_logging};

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so a stdout dry run stays pipeable
    init_logging(args.log_level, args.log_format)?;

    let stats = run::execute(args).await?;

    eprintln!();
    eprintln!("Inventory completed:");
    eprintln!("  Objects listed:    {}", format_count(stats.objects_listed));
    eprintln!("  Journals found:    {}", format_count(stats.journals_found));
    eprintln!("  Events built:      {}", format_count(stats.events_built));
    eprintln!("  Keys skipped:      {}", format_count(stats.keys_skipped));
    eprintln!(
        "  Batches delivered: {}",
        format_count(stats.batches_delivered)
    );
    eprintln!(
        "  Records delivered: {} ({})",
        format_count(stats.records_delivered),
        format_bytes(stats.bytes_delivered)
    );

    if let Some(duration) = stats.duration() {
        eprintln!("  Duration:          {}", format_duration(duration));
    }

    if stats.has_errors() {
        for error in &stats.errors {
            eprintln!("  Error: {}", error);
        }
        std::process::exit(4); // Partial failure
    }

    Ok(())
}

//! CLI argument definitions for ddss-inventory.

use clap::{Parser, ValueEnum};
use ddss_cli_common::{LogFormat, LogLevel};
use ddss_inventory::batch::{
    DEFAULT_MAX_BYTES, DEFAULT_MAX_RECORDS, FIREHOSE_MAX_BYTES, FIREHOSE_MAX_RECORDS,
};

/// Splunk DDSS bucket inventory.
///
/// Lists the journal files Splunk archived to S3, derives bucket metadata
/// from each key, and sends it as Splunk events to a Firehose stream.
/// Every option can also be set through the environment variable the
/// Lambda function uses.
///
/// ## Examples
///
/// Send to Firehose:
///   ddss-inventory -b ddss-archive --firehose-name splunk-ddss --splunk-index ddss_meta
///
/// Dry run, printing events as JSON lines:
///   ddss-inventory -b ddss-archive --splunk-index ddss_meta --destination stdout
#[derive(Parser, Debug)]
#[command(name = "ddss-inventory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === S3 Configuration ===
    /// S3 bucket holding the DDSS archive
    #[arg(short, long, env = "BUCKET_NAME")]
    pub bucket: String,

    /// S3 prefix to narrow the listing
    #[arg(short, long, env = "DDSS_PREFIX")]
    pub prefix: Option<String>,

    /// Custom S3 endpoint URL (for LocalStack)
    #[arg(long, env = "DDSS_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// AWS access key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    pub access_key: Option<String>,

    /// AWS secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// AWS profile name
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    // === Event Options ===
    /// Splunk index the events are written to
    #[arg(long, env = "SPLUNK_INDEX")]
    pub splunk_index: String,

    /// Value for the event host and source fields
    #[arg(long, env = "AWS_LAMBDA_FUNCTION_NAME", default_value = "ddss-inventory")]
    pub source: String,

    // === Destination Options ===
    /// Delivery destination
    #[arg(long, value_enum, default_value = "firehose")]
    pub destination: DestinationType,

    /// Firehose delivery stream name (required when destination=firehose)
    #[arg(long, env = "FIREHOSE_NAME")]
    pub firehose_name: Option<String>,

    /// Custom Firehose endpoint URL (for LocalStack)
    #[arg(long, env = "DDSS_FIREHOSE_ENDPOINT")]
    pub firehose_endpoint: Option<String>,

    /// Maximum records per delivery (1-500)
    #[arg(long, env = "DDSS_MAX_BATCH_RECORDS", default_value_t = DEFAULT_MAX_RECORDS, value_parser = parse_max_records)]
    pub max_batch_records: usize,

    /// Maximum serialized bytes per delivery
    #[arg(long, env = "DDSS_MAX_BATCH_BYTES", default_value_t = DEFAULT_MAX_BYTES, value_parser = parse_max_bytes)]
    pub max_batch_bytes: usize,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,
}

/// Destination type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DestinationType {
    /// Send to a Firehose delivery stream
    Firehose,
    /// Print events to stdout (dry run)
    Stdout,
}

fn parse_bounded(s: &str, max: usize) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(1..=max).contains(&value) {
        return Err(format!("{} is not in 1..={}", value, max));
    }
    Ok(value)
}

/// Parse the per-delivery record limit.
fn parse_max_records(s: &str) -> Result<usize, String> {
    parse_bounded(s, FIREHOSE_MAX_RECORDS)
}

/// Parse the per-delivery byte limit.
fn parse_max_bytes(s: &str) -> Result<usize, String> {
    parse_bounded(s, FIREHOSE_MAX_BYTES)
}

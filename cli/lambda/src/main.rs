//! ddss-inventory Lambda function
//!
//! Runs one inventory pass per scheduled invocation. Configuration is read
//! from the environment at cold start; clients and the [`Inventory`] are
//! reused across warm invocations, each of which starts from an empty batch.

use clap::ValueEnum;
use ddss_cli_common::{LogFormat, LogLevel, init_logging};
use ddss_inventory::{
    FirehoseDelivery, Inventory, InventoryConfig, S3JournalLister, create_s3_client,
};
use lambda_runtime::{Error, run, service_fn};

mod handler;

fn env_choice<T: ValueEnum>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| T::from_str(&v, true).ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // JSON by default for CloudWatch
    let log_level = env_choice("LOG_LEVEL", LogLevel::Info);
    let log_format = env_choice("LOG_FORMAT", LogFormat::Json);
    init_logging(log_level, log_format)?;

    let config = InventoryConfig::from_env()?;

    let s3_client = create_s3_client(&config.s3_config()).await?;
    let lister = S3JournalLister::new(s3_client, &config.bucket, config.prefix.clone());
    let delivery = FirehoseDelivery::new(config.firehose_config()).await?;

    let inventory = Inventory::new(lister, delivery, config);

    run(service_fn(|event| handler::function_handler(event, &inventory))).await
}

//! Main execution logic for the ddss-inventory CLI.

use anyhow::{Result, anyhow};
use ddss_inventory::{
    BatchLimits, Delivery, FirehoseDelivery, Inventory, InventoryConfig, RunStats,
    S3JournalLister, StdoutDelivery, create_s3_client,
};

use crate::args::{Cli, DestinationType};

/// Build the run configuration from CLI arguments.
///
/// The Firehose stream name is only required when delivering to Firehose;
/// a dry run labels itself `stdout`.
pub fn build_config(args: &Cli) -> Result<InventoryConfig> {
    let stream_name = match args.destination {
        DestinationType::Firehose => args
            .firehose_name
            .clone()
            .ok_or_else(|| anyhow!("--firehose-name is required when destination=firehose"))?,
        DestinationType::Stdout => "stdout".to_string(),
    };

    let mut config = InventoryConfig::new(
        &args.bucket,
        stream_name,
        &args.splunk_index,
        &args.source,
        &args.region,
    )
    .with_limits(BatchLimits::new(
        args.max_batch_records,
        args.max_batch_bytes,
    ));

    if let Some(prefix) = &args.prefix {
        config = config.with_prefix(prefix);
    }
    if let Some(endpoint) = &args.s3_endpoint {
        config = config.with_s3_endpoint(endpoint);
    }
    if let Some(endpoint) = &args.firehose_endpoint {
        config = config.with_firehose_endpoint(endpoint);
    }

    config.validate()?;
    Ok(config)
}

/// Execute one inventory run with the provided arguments.
pub async fn execute(args: Cli) -> Result<RunStats> {
    let config = build_config(&args)?;

    let mut s3_config = config.s3_config();
    if let (Some(access_key), Some(secret_key)) = (&args.access_key, &args.secret_key) {
        s3_config = s3_config.with_credentials(access_key, secret_key);
    }
    if let Some(profile) = &args.profile {
        s3_config = s3_config.with_profile(profile);
    }

    let s3_client = create_s3_client(&s3_config).await?;
    let lister = S3JournalLister::new(s3_client, &config.bucket, config.prefix.clone());

    let stats = match args.destination {
        DestinationType::Firehose => {
            let mut firehose_config = config.firehose_config();
            if let (Some(access_key), Some(secret_key)) = (&args.access_key, &args.secret_key) {
                firehose_config = firehose_config.with_credentials(access_key, secret_key);
            }
            if let Some(profile) = &args.profile {
                firehose_config = firehose_config.with_profile(profile);
            }

            let delivery = FirehoseDelivery::new(firehose_config).await?;
            run_inventory(lister, delivery, config).await?
        }
        DestinationType::Stdout => run_inventory(lister, StdoutDelivery::new(), config).await?,
    };

    Ok(stats)
}

/// Run the inventory with a specific delivery type.
async fn run_inventory<D: Delivery>(
    lister: S3JournalLister,
    delivery: D,
    config: InventoryConfig,
) -> Result<RunStats> {
    let inventory = Inventory::new(lister, delivery, config);
    let stats = inventory.run().await?;
    Ok(stats)
}

//! ddss-inventory - Splunk DDSS bucket inventory for S3.
//!
//! This crate lists the journal files that Splunk Dynamic Data Self Storage
//! archives into an S3 bucket, derives bucket metadata from each key, and
//! forwards the metadata as Splunk HEC events to a Kinesis Data Firehose
//! delivery stream. It provides:
//!
//! - S3 listing with pagination and LocalStack support
//! - Journal key parsing into [`BucketMetadata`]
//! - Count/byte bounded batching into a caller-owned [`RecordBatch`]
//! - Delivery to Firehose or stdout
//!
//! # Example
//!
//! ```ignore
//! use ddss_inventory::{Inventory, InventoryConfig, S3JournalLister, FirehoseDelivery};
//! use ddss_inventory::s3::{S3Config, create_s3_client};
//!
//! let config = InventoryConfig::from_env()?;
//! let s3_client = create_s3_client(&config.s3_config()).await?;
//! let lister = S3JournalLister::new(s3_client, &config.bucket, config.prefix.clone());
//! let delivery = FirehoseDelivery::new(config.firehose_config()).await?;
//!
//! let stats = Inventory::new(lister, delivery, config).run().await?;
//! eprintln!("Delivered {} events", stats.records_delivered);
//! ```

pub mod aws;
pub mod batch;
pub mod batcher;
pub mod config;
pub mod delivery;
pub mod event;
pub mod filter;
pub mod inventory;
pub mod metadata;
pub mod s3;
pub mod stats;

pub use aws::AwsSettings;
pub use batch::{BatchLimits, RecordBatch};
pub use batcher::{FlushOutcome, submit};
pub use config::InventoryConfig;
pub use delivery::{Delivery, FirehoseConfig, FirehoseDelivery, StdoutDelivery};
pub use event::{EventEnvelope, SOURCETYPE};
pub use filter::{JOURNAL_SUFFIX, is_journal_key};
pub use inventory::Inventory;
pub use metadata::BucketMetadata;
pub use s3::{
    JournalListing, ObjectLister, S3Config, S3JournalLister, S3Object, create_s3_client,
    list_objects,
};
pub use stats::RunStats;

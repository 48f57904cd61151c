//! Inventory run orchestration.

use chrono::Utc;
use ddss_error::{Result, RunStage};
use tracing::{debug, info, warn};

use crate::batch::RecordBatch;
use crate::batcher::submit;
use crate::config::InventoryConfig;
use crate::delivery::Delivery;
use crate::event::{EventEnvelope, emission_time};
use crate::metadata::BucketMetadata;
use crate::s3::ObjectLister;
use crate::stats::RunStats;

/// Coordinates listing, metadata extraction, and batched delivery.
///
/// Generic over the lister and the delivery so the same run logic serves
/// S3 + Firehose in production and in-memory fakes in tests.
pub struct Inventory<L: ObjectLister, D: Delivery> {
    lister: L,
    delivery: D,
    config: InventoryConfig,
}

impl<L: ObjectLister, D: Delivery> Inventory<L, D> {
    /// Create a new Inventory.
    pub fn new(lister: L, delivery: D, config: InventoryConfig) -> Self {
        Self {
            lister,
            delivery,
            config,
        }
    }

    /// Run one inventory pass.
    ///
    /// Lists the bucket once, stamps every event with one emission time,
    /// submits each event, then forces a final flush. Keys that do not
    /// parse are skipped and recorded in the returned stats. Listing and
    /// delivery failures abort the run.
    pub async fn run(&self) -> Result<RunStats> {
        let mut stats = RunStats::new();

        info!(
            bucket = %self.lister.container(),
            destination = %self.delivery.name(),
            index = %self.config.splunk_index,
            "Starting inventory run"
        );

        let listing = self.lister.list_journal_keys().await.inspect_err(|e| {
            warn!(stage = %RunStage::Listing, error = %e, "Listing failed");
        })?;
        stats.record_listing(listing.objects_listed, listing.keys.len());

        let time = emission_time(Utc::now());
        let mut batch = RecordBatch::new(self.config.limits);

        for key in &listing.keys {
            let event = match self.build_event(key, time) {
                Ok(event) => event,
                Err(e) if !e.is_fatal() => {
                    warn!(stage = %RunStage::Extraction, key = %key, error = %e, "Skipping journal key");
                    stats.record_skipped(&e);
                    continue;
                }
                Err(e) => {
                    warn!(stage = %RunStage::Serialization, key = %key, error = %e, "Event serialization failed");
                    return Err(e);
                }
            };

            debug!(key = %key, "Built bucket event");
            stats.record_event();

            let outcome = submit(&self.delivery, &mut batch, Some(event), false)
                .await
                .inspect_err(|e| warn!(stage = %RunStage::Delivery, error = %e, "Delivery failed"))?;
            stats.record_flush(outcome);
        }

        let outcome = submit(&self.delivery, &mut batch, None, true)
            .await
            .inspect_err(|e| warn!(stage = %RunStage::Delivery, error = %e, "Delivery failed"))?;
        stats.record_flush(outcome);

        stats.complete();

        info!(
            objects_listed = stats.objects_listed,
            journals_found = stats.journals_found,
            events_built = stats.events_built,
            keys_skipped = stats.keys_skipped,
            batches_delivered = stats.batches_delivered,
            records_delivered = stats.records_delivered,
            bytes_delivered = stats.bytes_delivered,
            "Inventory run completed"
        );

        Ok(stats)
    }

    /// Build the serialized event for one journal key.
    pub fn build_event(&self, key: &str, time: f64) -> Result<String> {
        let metadata = BucketMetadata::from_key(key, &self.config.bucket)?;
        EventEnvelope::new(
            time,
            &self.config.function_name,
            &self.config.splunk_index,
            metadata,
        )
        .to_json()
    }
}

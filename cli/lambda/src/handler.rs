//! Invocation handler.

use ddss_inventory::{Delivery, Inventory, ObjectLister, RunStats};
use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{info, warn};

/// Handle one scheduled invocation.
///
/// The event payload is ignored. Listing, delivery, and configuration
/// failures fail the invocation; skipped keys are reported in the response.
pub async fn function_handler<L: ObjectLister, D: Delivery>(
    event: LambdaEvent<Value>,
    inventory: &Inventory<L, D>,
) -> Result<Value, Error> {
    let request_id = event.context.request_id;
    info!(request_id = %request_id, "Invocation received");

    let stats = inventory.run().await?;

    if stats.has_errors() {
        warn!(
            request_id = %request_id,
            keys_skipped = stats.keys_skipped,
            "Inventory completed with skipped keys"
        );
    }

    Ok(summary(&stats))
}

/// Response body describing a completed run.
pub fn summary(stats: &RunStats) -> Value {
    json!({
        "objectsListed": stats.objects_listed,
        "journalsFound": stats.journals_found,
        "eventsBuilt": stats.events_built,
        "keysSkipped": stats.keys_skipped,
        "batchesDelivered": stats.batches_delivered,
        "recordsDelivered": stats.records_delivered,
        "bytesDelivered": stats.bytes_delivered,
        "errors": stats.errors,
    })
}

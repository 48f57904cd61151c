//! Submitting events through a [`RecordBatch`] to a [`Delivery`].

use ddss_error::Result;
use tracing::info;

use crate::batch::RecordBatch;
use crate::delivery::Delivery;

/// What a call to [`submit`] delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushOutcome {
    /// Number of delivery calls made
    pub batches: usize,

    /// Records delivered across those calls
    pub records: usize,

    /// Serialized bytes delivered across those calls
    pub bytes: usize,
}

impl FlushOutcome {
    fn record(&mut self, records: usize, bytes: usize) {
        self.batches += 1;
        self.records += records;
        self.bytes += bytes;
    }
}

/// Submit one serialized event, flushing to `delivery` as the batch limits require.
///
/// - A `Some`, non-empty `event` is appended to `batch`. If it does not fit,
///   the records already buffered are delivered first.
/// - `final_flush` delivers whatever remains buffered.
/// - An empty batch is never sent.
///
/// After any delivery, successful or not, the delivered records are gone
/// from `batch`. Delivery errors are returned as-is; nothing is retried.
pub async fn submit<D: Delivery + ?Sized>(
    delivery: &D,
    batch: &mut RecordBatch,
    event: Option<String>,
    final_flush: bool,
) -> Result<FlushOutcome> {
    let mut outcome = FlushOutcome::default();

    if let Some(event) = event.filter(|e| !e.is_empty()) {
        if let Some(full) = batch.add(event) {
            deliver(delivery, full, &mut outcome).await?;
        }
    }

    if final_flush {
        let remaining = batch.take();
        deliver(delivery, remaining, &mut outcome).await?;
    }

    Ok(outcome)
}

async fn deliver<D: Delivery + ?Sized>(
    delivery: &D,
    records: Vec<String>,
    outcome: &mut FlushOutcome,
) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let bytes: usize = records.iter().map(String::len).sum();
    delivery.put_batch(&records).await?;

    info!(
        destination = delivery.name(),
        records = records.len(),
        bytes,
        "Delivered batch"
    );

    outcome.record(records.len(), bytes);
    Ok(())
}

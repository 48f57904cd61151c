//! Delivery destinations for serialized events.
//!
//! This module provides the [`Delivery`] trait and implementations for
//! sending batches of serialized events:
//! - [`FirehoseDelivery`] - Sends to a Kinesis Data Firehose delivery stream
//! - [`StdoutDelivery`] - Prints events as JSON lines (dry run)

mod firehose;
mod stdout;

pub use firehose::{FirehoseConfig, FirehoseDelivery, create_firehose_client};
pub use stdout::StdoutDelivery;

use async_trait::async_trait;
use ddss_error::Result;

/// Trait for delivering batches of serialized events.
///
/// A call to [`Delivery::put_batch`] is a single attempt: the whole batch is
/// accepted or the call fails. Implementations do not retry.
#[async_trait]
pub trait Delivery: Send + Sync {
    /// Deliver one batch of records, in order.
    async fn put_batch(&self, records: &[String]) -> Result<()>;

    /// Name of the destination, used in logs and errors.
    fn name(&self) -> &str;
}

//! Record batch accumulation for Firehose delivery.
//!
//! The [`RecordBatch`] collects serialized events until the next one would
//! push it over a record count or byte limit, then hands the accumulated
//! records back for delivery. Byte accounting is exact: it sums the UTF-8
//! length of each serialized record as it is added.
//!
//! # Example
//!
//! ```
//! use ddss_inventory::{BatchLimits, RecordBatch};
//!
//! let mut batch = RecordBatch::new(BatchLimits::new(2, 1_000));
//!
//! assert!(batch.add("a".to_string()).is_none());
//! assert!(batch.add("b".to_string()).is_none());
//!
//! // Third record would exceed the count limit: the first two come back
//! let flushed = batch.add("c".to_string()).unwrap();
//! assert_eq!(flushed, vec!["a".to_string(), "b".to_string()]);
//! assert_eq!(batch.len(), 1);
//! ```

use ddss_error::{DdssError, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default maximum records per delivery.
pub const DEFAULT_MAX_RECORDS: usize = 200;

/// Default maximum serialized bytes per delivery.
pub const DEFAULT_MAX_BYTES: usize = 2_000_000;

/// Firehose `PutRecordBatch` hard limit on records per request.
pub const FIREHOSE_MAX_RECORDS: usize = 500;

/// Firehose `PutRecordBatch` hard limit on bytes per request.
pub const FIREHOSE_MAX_BYTES: usize = 4 * 1024 * 1024;

/// Record count and byte limits for one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchLimits {
    /// Maximum records per delivery
    pub max_records: usize,

    /// Maximum serialized bytes per delivery
    pub max_bytes: usize,
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl BatchLimits {
    /// Create limits with explicit values.
    pub fn new(max_records: usize, max_bytes: usize) -> Self {
        Self {
            max_records,
            max_bytes,
        }
    }

    /// Check the limits against what Firehose accepts in one request.
    pub fn validate(&self) -> Result<()> {
        if !(1..=FIREHOSE_MAX_RECORDS).contains(&self.max_records) {
            return Err(DdssError::Config(format!(
                "max batch records {} is not in 1..={}",
                self.max_records, FIREHOSE_MAX_RECORDS
            )));
        }
        if !(1..=FIREHOSE_MAX_BYTES).contains(&self.max_bytes) {
            return Err(DdssError::Config(format!(
                "max batch bytes {} is not in 1..={}",
                self.max_bytes, FIREHOSE_MAX_BYTES
            )));
        }
        Ok(())
    }
}

/// Ordered buffer of serialized events awaiting delivery.
///
/// Owned by the run that fills it, so no state survives between runs.
///
/// # Flush Behavior
///
/// When adding a record would make the batch exceed either limit:
/// 1. All currently buffered records are returned for delivery
/// 2. The new record starts the next batch
///
/// A record larger than `max_bytes` on its own is still accepted into an
/// empty batch and delivered alone.
#[derive(Debug, Default)]
pub struct RecordBatch {
    records: Vec<String>,
    current_bytes: usize,
    limits: BatchLimits,
}

impl RecordBatch {
    /// Create an empty batch with the given limits.
    pub fn new(limits: BatchLimits) -> Self {
        Self {
            records: Vec::new(),
            current_bytes: 0,
            limits,
        }
    }

    /// Add a serialized record.
    ///
    /// Returns the previously buffered records if they must be delivered
    /// before this one fits.
    pub fn add(&mut self, record: String) -> Option<Vec<String>> {
        let record_bytes = record.len();

        let would_exceed_records = self.records.len() + 1 > self.limits.max_records;
        let would_exceed_bytes = self.current_bytes + record_bytes > self.limits.max_bytes;

        if (would_exceed_records || would_exceed_bytes) && !self.records.is_empty() {
            let flushed = self.take();

            trace!(
                flush_records = flushed.len(),
                would_exceed_records,
                would_exceed_bytes,
                "Batch limit reached"
            );

            self.records.push(record);
            self.current_bytes = record_bytes;
            Some(flushed)
        } else {
            self.records.push(record);
            self.current_bytes += record_bytes;
            None
        }
    }

    /// Remove and return every buffered record, leaving the batch empty.
    pub fn take(&mut self) -> Vec<String> {
        self.current_bytes = 0;
        std::mem::take(&mut self.records)
    }

    /// Returns the buffered records in arrival order.
    #[inline]
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// Returns the number of buffered records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the exact serialized size of the buffered records.
    #[inline]
    pub fn current_bytes(&self) -> usize {
        self.current_bytes
    }
}

//! Splunk HEC event envelopes.

use chrono::{DateTime, Utc};
use ddss_error::{DdssError, Result};
use serde::{Deserialize, Serialize};

use crate::metadata::BucketMetadata;

/// Source type stamped on every inventory event.
pub const SOURCETYPE: &str = "splunk-ddss-exploration-toolkit";

/// A Splunk HEC event carrying the metadata of one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Emission time in fractional seconds since the epoch, shared by the whole run
    pub time: f64,

    /// Origin host, the Lambda function name
    pub host: String,

    /// Origin source, the same value as `host`
    pub source: String,

    /// Always [`SOURCETYPE`]
    pub sourcetype: String,

    /// Splunk index the event is written to
    pub index: String,

    /// Bucket metadata carried as the event body
    pub event: BucketMetadata,
}

impl EventEnvelope {
    /// Wrap bucket metadata for delivery.
    ///
    /// `origin` is used as both `host` and `source`.
    pub fn new(
        time: f64,
        origin: impl Into<String>,
        index: impl Into<String>,
        event: BucketMetadata,
    ) -> Self {
        let origin = origin.into();
        Self {
            time,
            host: origin.clone(),
            source: origin,
            sourcetype: SOURCETYPE.to_string(),
            index: index.into(),
            event,
        }
    }

    /// Serialize to a single-line JSON record.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| DdssError::Serialization(format!("event envelope: {e}")))
    }
}

/// Convert a wall-clock instant to HEC `time` (seconds with microsecond precision).
pub fn emission_time(now: DateTime<Utc>) -> f64 {
    now.timestamp_micros() as f64 / 1_000_000.0
}

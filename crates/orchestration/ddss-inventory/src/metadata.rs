//! Bucket metadata extraction from DDSS journal keys.
//!
//! DDSS archives every Splunk bucket under a key of the form
//!
//! ```text
//! [prefix/]<index>/db_<latestEpoch>_<earliestEpoch>_<id>[_<guid>]/rawdata/journal.zst
//! ```
//!
//! so the index and the bucket time range can be read straight off the key
//! without fetching the object.

use chrono::{Local, TimeZone};
use ddss_error::{DdssError, Result};
use serde::{Deserialize, Serialize};

/// Number of trailing characters (`/rawdata/journal.zst`) dropped to form the bucket path.
pub const BUCKET_PATH_TRIM: usize = 20;

const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Metadata of one Splunk bucket, derived from its journal key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketMetadata {
    /// Earliest event time in the bucket, epoch seconds as found in the key
    #[serde(rename = "splunkBucketEarliestTimestampEpoch")]
    pub earliest_epoch: String,

    /// Earliest event time as an ISO 8601 local timestamp
    #[serde(rename = "splunkBucketEarliestTimestamp")]
    pub earliest_timestamp: String,

    /// Latest event time in the bucket, epoch seconds as found in the key
    #[serde(rename = "splunkBucketLatestTimestampEpoch")]
    pub latest_epoch: String,

    /// Latest event time as an ISO 8601 local timestamp
    #[serde(rename = "splunkBucketLatestTimestamp")]
    pub latest_timestamp: String,

    /// Splunk index the bucket belongs to
    #[serde(rename = "splunkBucketIndex")]
    pub index: String,

    /// Key of the bucket directory
    #[serde(rename = "splunkBucketPath")]
    pub bucket_path: String,

    /// S3 bucket holding the archive
    #[serde(rename = "s3BucketName")]
    pub s3_bucket: String,
}

impl BucketMetadata {
    /// Parse a journal key, rendering timestamps in the host's local time zone.
    pub fn from_key(key: &str, s3_bucket: &str) -> Result<Self> {
        Self::from_key_in(key, s3_bucket, &Local)
    }

    /// Parse a journal key, rendering timestamps in the given time zone.
    ///
    /// # Errors
    ///
    /// Returns [`DdssError::MalformedKey`] if the key has fewer than four
    /// path segments, the bucket directory has fewer than three `_` parts,
    /// either epoch is not an integer in the representable range, or the
    /// key is too short to drop the trailing `/rawdata/journal.zst`.
    pub fn from_key_in<Tz: TimeZone>(key: &str, s3_bucket: &str, tz: &Tz) -> Result<Self> {
        let segments: Vec<&str> = key.split('/').collect();
        if segments.len() < 4 {
            return Err(DdssError::malformed(
                key,
                format!(
                    "expected at least 4 path segments, found {}",
                    segments.len()
                ),
            ));
        }

        let bucket_dir = segments[segments.len() - 3];
        let index = segments[segments.len() - 4];

        let parts: Vec<&str> = bucket_dir.split('_').collect();
        if parts.len() < 3 {
            return Err(DdssError::malformed(
                key,
                format!("bucket directory '{bucket_dir}' has fewer than 3 '_' parts"),
            ));
        }

        let latest_epoch = parts[1];
        let earliest_epoch = parts[2];

        let earliest_timestamp = epoch_to_iso8601(key, earliest_epoch, tz)?;
        let latest_timestamp = epoch_to_iso8601(key, latest_epoch, tz)?;

        let bucket_path = key
            .char_indices()
            .rev()
            .nth(BUCKET_PATH_TRIM - 1)
            .map(|(end, _)| &key[..end])
            .ok_or_else(|| {
                DdssError::malformed(
                    key,
                    format!("key too short to drop the trailing {BUCKET_PATH_TRIM} characters"),
                )
            })?;

        Ok(Self {
            earliest_epoch: earliest_epoch.to_string(),
            earliest_timestamp,
            latest_epoch: latest_epoch.to_string(),
            latest_timestamp,
            index: index.to_string(),
            bucket_path: bucket_path.to_string(),
            s3_bucket: s3_bucket.to_string(),
        })
    }
}

fn epoch_to_iso8601<Tz: TimeZone>(key: &str, epoch: &str, tz: &Tz) -> Result<String> {
    let secs: i64 = epoch
        .parse()
        .map_err(|_| DdssError::malformed(key, format!("epoch '{epoch}' is not an integer")))?;

    let datetime = tz
        .timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| DdssError::malformed(key, format!("epoch {secs} is out of range")))?;

    Ok(datetime.naive_local().format(ISO8601_FORMAT).to_string())
}

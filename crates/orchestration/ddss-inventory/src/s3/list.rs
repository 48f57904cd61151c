//! S3 object listing with pagination support.

use async_stream::try_stream;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use ddss_error::{DdssError, Result};
use futures::{Stream, StreamExt, pin_mut};
use tracing::debug;

use crate::filter::is_journal_key;

/// An S3 object discovered during listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Object {
    /// The object key (full path within the bucket)
    pub key: String,
}

/// Result of listing a bucket for journal files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalListing {
    /// Every object seen, journal or not
    pub objects_listed: usize,

    /// Journal keys in the order the store returned them
    pub keys: Vec<String>,
}

/// Source of journal keys for an inventory run.
///
/// Listing is all-or-nothing: an implementation returns every journal key
/// or an error, never a partial listing.
#[async_trait]
pub trait ObjectLister: Send + Sync {
    /// List all journal keys in the container.
    async fn list_journal_keys(&self) -> Result<JournalListing>;

    /// Name of the container being listed.
    fn container(&self) -> &str;
}

/// [`ObjectLister`] backed by `ListObjectsV2`.
pub struct S3JournalLister {
    client: Client,
    bucket: String,
    prefix: Option<String>,
}

impl S3JournalLister {
    /// Create a lister for a bucket and optional prefix.
    pub fn new(client: Client, bucket: impl Into<String>, prefix: Option<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix,
        }
    }
}

#[async_trait]
impl ObjectLister for S3JournalLister {
    async fn list_journal_keys(&self) -> Result<JournalListing> {
        debug!(bucket = %self.bucket, prefix = ?self.prefix, "Listing journal files");

        let stream = list_objects(&self.client, &self.bucket, self.prefix.as_deref());
        pin_mut!(stream);

        let mut listing = JournalListing::default();
        while let Some(result) = stream.next().await {
            let obj = result?;
            listing.objects_listed += 1;
            if is_journal_key(&obj.key) {
                listing.keys.push(obj.key);
            }
        }

        debug!(
            bucket = %self.bucket,
            objects = listing.objects_listed,
            journals = listing.keys.len(),
            "Listing complete"
        );

        Ok(listing)
    }

    fn container(&self) -> &str {
        &self.bucket
    }
}

/// List objects in an S3 bucket with optional prefix filtering.
///
/// Returns a stream of [`S3Object`] items, handling pagination automatically.
/// Directory markers (keys ending with `/`) are filtered out. A failed page
/// yields [`DdssError::ListingFailed`] naming the bucket.
///
/// # Example
///
/// ```ignore
/// use futures::StreamExt;
///
/// let stream = list_objects(&client, "ddss-archive", Some("splunk/"));
/// pin_mut!(stream);
///
/// while let Some(result) = stream.next().await {
///     let obj = result?;
///     println!("Found: {}", obj.key);
/// }
/// ```
pub fn list_objects<'a>(
    client: &'a Client,
    bucket: &'a str,
    prefix: Option<&'a str>,
) -> impl Stream<Item = Result<S3Object>> + 'a {
    let bucket = bucket.to_string();
    let prefix = prefix.map(|s| s.to_string());

    try_stream! {
        let mut continuation_token: Option<String> = None;

        loop {
            let mut req = client.list_objects_v2().bucket(&bucket);

            if let Some(ref prefix) = prefix {
                req = req.prefix(prefix);
            }

            if let Some(ref token) = continuation_token {
                req = req.continuation_token(token);
            }

            let resp = req
                .send()
                .await
                .map_err(|e| DdssError::listing(&bucket, e))?;

            if let Some(contents) = resp.contents {
                for obj in contents {
                    let key = obj.key.unwrap_or_default();

                    if key.is_empty() || key.ends_with('/') {
                        continue;
                    }

                    yield S3Object { key };
                }
            }

            if resp.is_truncated == Some(true) {
                continuation_token = resp.next_continuation_token;
                if continuation_token.is_none() {
                    break;
                }
            } else {
                break;
            }
        }
    }
}

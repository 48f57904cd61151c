//! Kinesis Data Firehose delivery.

use async_trait::async_trait;
use aws_sdk_firehose::Client;
use aws_sdk_firehose::operation::put_record_batch::PutRecordBatchOutput;
use aws_sdk_firehose::primitives::Blob;
use aws_sdk_firehose::types::Record;
use ddss_error::{DdssError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Delivery;
use crate::aws::AwsSettings;

/// Target stream and how to reach Firehose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirehoseConfig {
    /// Delivery stream name
    pub stream_name: String,

    /// Region, endpoint, and credentials
    pub aws: AwsSettings,
}

impl FirehoseConfig {
    pub fn new(stream_name: impl Into<String>) -> Self {
        Self {
            stream_name: stream_name.into(),
            aws: AwsSettings::default(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.aws.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.aws.region = Some(region.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.aws.access_key = Some(access_key.into());
        self.aws.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.aws.profile = Some(profile.into());
        self
    }
}

/// Firehose delivery using `PutRecordBatch`.
///
/// Each serialized event becomes one Firehose record. A response reporting
/// any failed record fails the whole call; nothing is resubmitted.
pub struct FirehoseDelivery {
    client: Client,
    stream_name: String,
}

impl FirehoseDelivery {
    /// Create a new FirehoseDelivery from configuration.
    pub async fn new(config: FirehoseConfig) -> Result<Self> {
        let client = create_firehose_client(&config).await?;
        Ok(Self {
            client,
            stream_name: config.stream_name,
        })
    }

    /// Create a new FirehoseDelivery with an existing client (useful for testing).
    pub fn with_client(client: Client, stream_name: impl Into<String>) -> Self {
        Self {
            client,
            stream_name: stream_name.into(),
        }
    }

    fn build_records(&self, records: &[String]) -> Result<Vec<Record>> {
        records
            .iter()
            .map(|data| {
                Record::builder()
                    .data(Blob::new(data.as_bytes()))
                    .build()
                    .map_err(|e| {
                        DdssError::delivery(&self.stream_name, format!("invalid record: {e}"))
                    })
            })
            .collect()
    }
}

#[async_trait]
impl Delivery for FirehoseDelivery {
    async fn put_batch(&self, records: &[String]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        debug!(count = records.len(), stream = %self.stream_name, "Sending Firehose batch");

        let output = self
            .client
            .put_record_batch()
            .delivery_stream_name(&self.stream_name)
            .set_records(Some(self.build_records(records)?))
            .send()
            .await
            .map_err(|e| DdssError::delivery(&self.stream_name, e))?;

        check_response(&self.stream_name, records.len(), &output)
    }

    fn name(&self) -> &str {
        &self.stream_name
    }
}

/// Fail the call if Firehose rejected any record.
///
/// `PutRecordBatch` succeeds at the HTTP level even when individual records
/// fail; the per-record error codes end up in the error message.
fn check_response(stream: &str, sent: usize, output: &PutRecordBatchOutput) -> Result<()> {
    let failed = output.failed_put_count();
    if failed == 0 {
        return Ok(());
    }

    let codes: Vec<&str> = output
        .request_responses()
        .iter()
        .filter_map(|entry| entry.error_code())
        .collect();

    Err(DdssError::delivery(
        stream,
        format!("{failed} of {sent} records failed: {codes:?}"),
    ))
}

/// Build a Firehose client from configuration.
pub async fn create_firehose_client(config: &FirehoseConfig) -> Result<Client> {
    let sdk_config = config.aws.load().await;
    Ok(Client::new(&sdk_config))
}

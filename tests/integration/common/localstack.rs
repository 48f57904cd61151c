//! LocalStack test context and utilities.

use aws_sdk_firehose::Client as FirehoseClient;
use aws_sdk_firehose::types::{DeliveryStreamType, ExtendedS3DestinationConfiguration};
use aws_sdk_s3::Client as S3Client;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// LocalStack test context providing S3 and Firehose clients.
pub struct LocalStackTestContext {
    pub s3: S3Client,
    pub firehose: FirehoseClient,
    pub endpoint: String,
    pub region: String,
}

impl LocalStackTestContext {
    /// Create a new LocalStack test context.
    ///
    /// Uses the `LOCALSTACK_ENDPOINT` environment variable if set,
    /// otherwise defaults to `http://localhost:4566`.
    pub async fn new() -> Self {
        let endpoint = std::env::var("LOCALSTACK_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4566".to_string());
        let region = "us-east-1".to_string();

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(region.clone()))
            .endpoint_url(&endpoint)
            .credentials_provider(aws_sdk_s3::config::Credentials::new(
                "test", "test", None, None, "localstack",
            ))
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        Self {
            s3: S3Client::from_conf(s3_config),
            firehose: FirehoseClient::new(&config),
            endpoint,
            region,
        }
    }

    /// Check if LocalStack is available and healthy.
    pub async fn is_available(&self) -> bool {
        self.s3.list_buckets().send().await.is_ok()
    }

    /// Create an S3 bucket for testing.
    pub async fn create_bucket(&self, name: &str) -> Result<(), aws_sdk_s3::Error> {
        let buckets = self.s3.list_buckets().send().await?;
        let exists = buckets
            .buckets()
            .iter()
            .any(|b| b.name().unwrap_or_default() == name);

        if !exists {
            self.s3.create_bucket().bucket(name).send().await?;
        }
        Ok(())
    }

    /// Upload a small placeholder object under `key`.
    pub async fn put_object(&self, bucket: &str, key: &str) -> Result<(), aws_sdk_s3::Error> {
        self.s3
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(b"zstd-placeholder".to_vec().into())
            .send()
            .await?;
        Ok(())
    }

    /// Delete every object in a bucket.
    pub async fn empty_bucket(&self, bucket: &str) -> Result<(), aws_sdk_s3::Error> {
        let listed = self.s3.list_objects_v2().bucket(bucket).send().await?;
        for object in listed.contents() {
            if let Some(key) = object.key() {
                self.s3.delete_object().bucket(bucket).key(key).send().await?;
            }
        }
        Ok(())
    }

    /// Create a DirectPut delivery stream writing into `destination_bucket`.
    pub async fn create_delivery_stream(
        &self,
        name: &str,
        destination_bucket: &str,
    ) -> Result<(), BoxError> {
        let streams = self.firehose.list_delivery_streams().send().await?;
        if streams.delivery_stream_names().iter().any(|s| s == name) {
            return Ok(());
        }

        let destination = ExtendedS3DestinationConfiguration::builder()
            .role_arn("arn:aws:iam::000000000000:role/firehose-role")
            .bucket_arn(format!("arn:aws:s3:::{destination_bucket}"))
            .build()?;

        self.firehose
            .create_delivery_stream()
            .delivery_stream_name(name)
            .delivery_stream_type(DeliveryStreamType::DirectPut)
            .extended_s3_destination_configuration(destination)
            .send()
            .await?;
        Ok(())
    }
}

/// Build a DDSS journal key for a bucket spanning `earliest..=latest`.
pub fn ddss_journal_key(index: &str, latest: i64, earliest: i64, id: usize) -> String {
    format!("{index}/db_{latest}_{earliest}_{id}_A1B2C3D4/rawdata/journal.zst")
}

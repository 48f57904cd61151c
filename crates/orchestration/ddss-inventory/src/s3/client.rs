//! S3 client for the DDSS archive bucket.

use aws_sdk_s3::Client;
use aws_sdk_s3::config::Builder;
use ddss_error::Result;
use serde::{Deserialize, Serialize};

use crate::aws::AwsSettings;

/// Where to list journals and how to reach S3.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Config {
    /// S3 bucket holding the DDSS archive
    pub bucket: String,

    /// Optional prefix to narrow the listing
    pub prefix: Option<String>,

    /// Region, endpoint, and credentials
    pub aws: AwsSettings,
}

impl S3Config {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Point the client at a custom endpoint. Enables path-style addressing.
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

    /// Whether bucket names go in the path rather than the host name.
    ///
    /// Custom endpoints such as LocalStack do not resolve virtual-hosted buckets.
    pub fn path_style(&self) -> bool {
        self.aws.endpoint.is_some()
    }
}

/// Create an S3 client from configuration.
pub async fn create_s3_client(config: &S3Config) -> Result<Client> {
    let sdk_config = config.aws.load().await;
    let s3_config = Builder::from(&sdk_config)
        .force_path_style(config.path_style())
        .build();

    Ok(Client::from_conf(s3_config))
}

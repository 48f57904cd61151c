//! Configuration for an inventory run.

use ddss_error::{DdssError, Result};
use serde::{Deserialize, Serialize};

use crate::batch::BatchLimits;
use crate::delivery::FirehoseConfig;
use crate::s3::S3Config;

/// Environment variable naming the S3 bucket holding the DDSS archive.
pub const ENV_BUCKET_NAME: &str = "BUCKET_NAME";
/// Environment variable naming the Firehose delivery stream.
pub const ENV_FIREHOSE_NAME: &str = "FIREHOSE_NAME";
/// Environment variable naming the Splunk index events are written to.
pub const ENV_SPLUNK_INDEX: &str = "SPLUNK_INDEX";
/// Environment variable set by Lambda to the function name.
pub const ENV_FUNCTION_NAME: &str = "AWS_LAMBDA_FUNCTION_NAME";
/// Environment variable set by Lambda to the region.
pub const ENV_REGION: &str = "AWS_REGION";

/// Optional environment variable narrowing the listing to a key prefix.
pub const ENV_PREFIX: &str = "DDSS_PREFIX";
/// Optional environment variable overriding the per-delivery record limit.
pub const ENV_MAX_BATCH_RECORDS: &str = "DDSS_MAX_BATCH_RECORDS";
/// Optional environment variable overriding the per-delivery byte limit.
pub const ENV_MAX_BATCH_BYTES: &str = "DDSS_MAX_BATCH_BYTES";
/// Optional environment variable with a custom S3 endpoint URL.
pub const ENV_S3_ENDPOINT: &str = "DDSS_S3_ENDPOINT";
/// Optional environment variable with a custom Firehose endpoint URL.
pub const ENV_FIREHOSE_ENDPOINT: &str = "DDSS_FIREHOSE_ENDPOINT";

/// Configuration for an inventory run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// S3 bucket holding the DDSS archive
    pub bucket: String,

    /// Firehose delivery stream name
    pub stream_name: String,

    /// Splunk index events are written to
    pub splunk_index: String,

    /// Identifier used as event `host` and `source`
    pub function_name: String,

    /// AWS region
    pub region: String,

    /// Optional prefix to narrow the listing
    pub prefix: Option<String>,

    /// Per-delivery limits
    pub limits: BatchLimits,

    /// Custom S3 endpoint (for LocalStack)
    pub s3_endpoint: Option<String>,

    /// Custom Firehose endpoint (for LocalStack)
    pub firehose_endpoint: Option<String>,
}

impl InventoryConfig {
    /// Create a configuration with the required settings and default limits.
    pub fn new(
        bucket: impl Into<String>,
        stream_name: impl Into<String>,
        splunk_index: impl Into<String>,
        function_name: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            stream_name: stream_name.into(),
            splunk_index: splunk_index.into(),
            function_name: function_name.into(),
            region: region.into(),
            prefix: None,
            limits: BatchLimits::default(),
            s3_endpoint: None,
            firehose_endpoint: None,
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// The five required variables must be present and non-empty. Optional
    /// variables that are present must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String> {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| DdssError::Config(format!("{name} must be set")))
        };
        let optional = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let mut config = Self::new(
            required(ENV_BUCKET_NAME)?,
            required(ENV_FIREHOSE_NAME)?,
            required(ENV_SPLUNK_INDEX)?,
            required(ENV_FUNCTION_NAME)?,
            required(ENV_REGION)?,
        );

        config.prefix = optional(ENV_PREFIX);
        config.s3_endpoint = optional(ENV_S3_ENDPOINT);
        config.firehose_endpoint = optional(ENV_FIREHOSE_ENDPOINT);

        if let Some(value) = optional(ENV_MAX_BATCH_RECORDS) {
            config.limits.max_records = parse_usize(ENV_MAX_BATCH_RECORDS, &value)?;
        }
        if let Some(value) = optional(ENV_MAX_BATCH_BYTES) {
            config.limits.max_bytes = parse_usize(ENV_MAX_BATCH_BYTES, &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the listing prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the per-delivery limits.
    pub fn with_limits(mut self, limits: BatchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set a custom S3 endpoint (for LocalStack).
    pub fn with_s3_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.s3_endpoint = Some(endpoint.into());
        self
    }

    /// Set a custom Firehose endpoint (for LocalStack).
    pub fn with_firehose_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.firehose_endpoint = Some(endpoint.into());
        self
    }

    /// Validate the batch limits.
    pub fn validate(&self) -> Result<()> {
        self.limits.validate()
    }

    /// S3 client settings for this run.
    pub fn s3_config(&self) -> S3Config {
        let mut s3_config = S3Config::new(&self.bucket).with_region(&self.region);
        if let Some(prefix) = &self.prefix {
            s3_config = s3_config.with_prefix(prefix);
        }
        if let Some(endpoint) = &self.s3_endpoint {
            s3_config = s3_config.with_endpoint(endpoint);
        }
        s3_config
    }

    /// Firehose client settings for this run.
    pub fn firehose_config(&self) -> FirehoseConfig {
        let mut firehose_config = FirehoseConfig::new(&self.stream_name).with_region(&self.region);
        if let Some(endpoint) = &self.firehose_endpoint {
            firehose_config = firehose_config.with_endpoint(endpoint);
        }
        firehose_config
    }
}

fn parse_usize(name: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| DdssError::Config(format!("{name}: '{value}' is not a valid number")))
}

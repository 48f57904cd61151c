//! AWS connection settings shared by the S3 and Firehose clients.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;
use serde::{Deserialize, Serialize};

/// Provider name attached to explicit credentials.
const CREDENTIALS_PROVIDER: &str = "ddss-inventory";

/// Region, endpoint, and credential overrides for one AWS service client.
///
/// Unset fields fall back to the SDK's default provider chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsSettings {
    /// AWS region
    pub region: Option<String>,

    /// Custom endpoint URL (for LocalStack)
    pub endpoint: Option<String>,

    /// Explicit access key, used only together with `secret_key`
    pub access_key: Option<String>,

    /// Explicit secret key, used only together with `access_key`
    pub secret_key: Option<String>,

    /// Named profile from the shared AWS config files
    pub profile: Option<String>,
}

impl AwsSettings {
    /// Explicit key pair, if both halves are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key, &self.secret_key) {
            (Some(access), Some(secret)) => Some((access.as_str(), secret.as_str())),
            _ => None,
        }
    }

    /// Resolve these settings into an SDK configuration.
    pub async fn load(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &self.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some((access, secret)) = self.credentials() {
            loader = loader.credentials_provider(Credentials::new(
                access,
                secret,
                None,
                None,
                CREDENTIALS_PROVIDER,
            ));
        }
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }

        loader.load().await
    }
}

//! AWS instance metadata (IMDSv2 with IMDSv1 fallback).

use async_trait::async_trait;

use super::ProviderProbe;
use crate::client::MetadataClient;
use crate::metadata::CloudInfo;
use crate::provider::CloudProvider;

/// AWS metadata service base URL (link-local address).
pub const DEFAULT_BASE_URL: &str = "http://169.254.169.254";

/// IMDSv2 token endpoint path.
const TOKEN_PATH: &str = "/latest/api/token";

/// Instance metadata base path.
const METADATA_PATH: &str = "/latest/meta-data";

/// Token TTL header name.
const TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";

/// Token lifetime requested, in seconds.
const TOKEN_TTL_SECONDS: &str = "21600";

/// Token header name for requests.
const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";

/// Detects EC2 through the instance metadata service.
#[derive(Debug, Clone)]
pub struct AwsProbe {
    base_url: String,
}

impl AwsProbe {
    /// Probe the metadata service at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn metadata_url(&self, field: &str) -> String {
        format!("{}{}/{}", self.base_url, METADATA_PATH, field)
    }
}

impl Default for AwsProbe {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ProviderProbe for AwsProbe {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Aws
    }

    async fn try_detect(&self, client: &MetadataClient) -> Option<CloudInfo> {
        let token_url = format!("{}{}", self.base_url, TOKEN_PATH);
        let token = client
            .put(&token_url, &[(TOKEN_TTL_HEADER, TOKEN_TTL_SECONDS)])
            .await;

        // Without a token, fall back to unauthenticated (IMDSv1) requests.
        let headers: Vec<(&str, &str)> = match token.as_deref() {
            Some(token) => vec![(TOKEN_HEADER, token)],
            None => Vec::new(),
        };

        let instance_id = client.get(&self.metadata_url("instance-id"), &headers).await;
        let region = client
            .get(&self.metadata_url("placement/region"), &headers)
            .await;
        let availability_zone = client
            .get(&self.metadata_url("placement/availability-zone"), &headers)
            .await;

        if instance_id.is_none() && region.is_none() {
            return None;
        }

        Some(CloudInfo {
            provider: CloudProvider::Aws,
            region,
            instance_id,
            availability_zone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(TOKEN_PATH, "/latest/api/token");
        assert_eq!(METADATA_PATH, "/latest/meta-data");
    }

    #[test]
    fn test_metadata_url() {
        let probe = AwsProbe::default();
        assert_eq!(
            probe.metadata_url("placement/availability-zone"),
            "http://169.254.169.254/latest/meta-data/placement/availability-zone"
        );
    }

    #[test]
    fn test_strips_trailing_slash() {
        let probe = AwsProbe::new("http://localhost:8080/");
        assert_eq!(probe.base_url(), "http://localhost:8080");
    }
}

//! GCP metadata server.

use async_trait::async_trait;

use super::ProviderProbe;
use crate::client::MetadataClient;
use crate::metadata::CloudInfo;
use crate::provider::CloudProvider;

/// GCP metadata server base URL.
pub const DEFAULT_BASE_URL: &str = "http://metadata.google.internal";

/// Instance metadata base path.
const INSTANCE_PATH: &str = "/computeMetadata/v1/instance";

/// Required header for GCP metadata requests.
const METADATA_FLAVOR_HEADER: &str = "Metadata-Flavor";

/// Required header value for GCP metadata requests.
const METADATA_FLAVOR_VALUE: &str = "Google";

/// Detects Compute Engine (and anything else serving the GCP metadata API).
#[derive(Debug, Clone)]
pub struct GcpProbe {
    base_url: String,
}

impl GcpProbe {
    /// Probe the metadata server at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn instance_url(&self, field: &str) -> String {
        format!("{}{}/{}", self.base_url, INSTANCE_PATH, field)
    }
}

impl Default for GcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Split a `projects/<number>/zones/<zone>` value into `(region, zone)`.
///
/// The zone is the last path segment; the region is the zone minus its
/// trailing `-<suffix>`, e.g. `us-central1-a` is in `us-central1`.
pub fn parse_zone(value: &str) -> (String, String) {
    let zone = value.rsplit('/').next().unwrap_or(value);
    let region = zone.rsplit_once('-').map_or(zone, |(region, _)| region);
    (region.to_string(), zone.to_string())
}

#[async_trait]
impl ProviderProbe for GcpProbe {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Gcp
    }

    async fn try_detect(&self, client: &MetadataClient) -> Option<CloudInfo> {
        let headers = [(METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE)];

        let instance_id = client.get(&self.instance_url("id"), &headers).await;
        let zone = client.get(&self.instance_url("zone"), &headers).await;

        if instance_id.is_none() && zone.is_none() {
            return None;
        }

        let (region, availability_zone) = match zone.as_deref().map(parse_zone) {
            Some((region, zone)) => (Some(region), Some(zone)),
            None => (None, None),
        };

        Some(CloudInfo {
            provider: CloudProvider::Gcp,
            region,
            instance_id,
            availability_zone,
        })
    }
}

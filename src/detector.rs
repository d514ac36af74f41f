//! Ordered cloud provider detection.

use crate::client::MetadataClient;
use crate::config::DetectorConfig;
use crate::error::MetadataError;
use crate::metadata::CloudInfo;
use crate::providers::{AwsProbe, GcpProbe, ProviderProbe};

/// Runs provider probes in order and reports the first one that answers.
///
/// Detection never fails: when every probe comes back empty the result is
/// [`CloudProvider::Local`](crate::CloudProvider::Local) with the configured
/// fallback region.
///
/// # Example
///
/// ```ignore
/// use hello_cloud::{CloudDetector, DetectorConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), hello_cloud::MetadataError> {
///     let detector = CloudDetector::from_config(&DetectorConfig::from_env())?;
///     let info = detector.detect().await;
///     println!("running on {}", info.provider);
///     Ok(())
/// }
/// ```
pub struct CloudDetector {
    client: MetadataClient,
    probes: Vec<Box<dyn ProviderProbe>>,
    fallback_region: Option<String>,
}

impl CloudDetector {
    /// Create a detector with no probes; add them with [`with_probe`](Self::with_probe).
    pub fn new(client: MetadataClient, fallback_region: Option<String>) -> Self {
        Self {
            client,
            probes: Vec::new(),
            fallback_region,
        }
    }

    /// Build the standard AWS then GCP chain.
    pub fn from_config(config: &DetectorConfig) -> Result<Self, MetadataError> {
        let client = MetadataClient::new(config.connect_timeout, config.read_timeout)?;
        Ok(Self::new(client, config.fallback_region.clone())
            .with_probe(AwsProbe::new(&config.aws_base_url))
            .with_probe(GcpProbe::new(&config.gcp_base_url)))
    }

    /// Append a probe; it runs after every probe already added.
    pub fn with_probe(mut self, probe: impl ProviderProbe + 'static) -> Self {
        self.probes.push(Box::new(probe));
        self
    }

    /// Probe each provider in turn, falling back to LOCAL.
    pub async fn detect(&self) -> CloudInfo {
        for probe in &self.probes {
            match probe.try_detect(&self.client).await {
                Some(info) => {
                    tracing::info!(
                        provider = %info.provider,
                        region = ?info.region,
                        instance_id = ?info.instance_id,
                        availability_zone = ?info.availability_zone,
                        "Detected cloud environment"
                    );
                    return info;
                }
                None => tracing::debug!(provider = %probe.provider(), "Provider not detected"),
            }
        }

        tracing::info!(region = ?self.fallback_region, "Running in local/unknown environment");
        CloudInfo::local(self.fallback_region.clone())
    }
}

impl std::fmt::Debug for CloudDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let probes: Vec<_> = self.probes.iter().map(|p| p.provider()).collect();
        f.debug_struct("CloudDetector")
            .field("probes", &probes)
            .field("fallback_region", &self.fallback_region)
            .finish()
    }
}

//! Per-provider detection attempts.

pub mod aws;
pub mod gcp;

use async_trait::async_trait;

use crate::client::MetadataClient;
use crate::metadata::CloudInfo;
use crate::provider::CloudProvider;

pub use aws::AwsProbe;
pub use gcp::GcpProbe;

/// One self-contained attempt to detect a cloud provider.
///
/// Returns `None` when the provider's metadata service gave nothing usable;
/// the detector then moves on to the next probe.
#[async_trait]
pub trait ProviderProbe: Send + Sync {
    /// The provider this probe reports on success.
    fn provider(&self) -> CloudProvider;

    /// Query the metadata service and build a [`CloudInfo`] from the answers.
    async fn try_detect(&self, client: &MetadataClient) -> Option<CloudInfo>;
}

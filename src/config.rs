//! Detector configuration and service defaults.

use std::time::Duration;

use crate::client::{CONNECT_TIMEOUT, READ_TIMEOUT};
use crate::providers::{aws, gcp};

/// Environment variable read for the region when no cloud is detected.
pub const REGION_ENV: &str = "REGION";

/// Default HTTP bind address.
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default HTTP port.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default log filter when RUST_LOG is not set.
pub const DEFAULT_LOG_FILTER: &str = "hello_cloud=info,tower_http=info";

/// Settings for building a [`CloudDetector`](crate::CloudDetector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// AWS instance metadata service base URL.
    pub aws_base_url: String,
    /// GCP metadata server base URL.
    pub gcp_base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// Region reported in the LOCAL fallback.
    pub fallback_region: Option<String>,
}

impl DetectorConfig {
    /// Defaults, with the fallback region taken from `REGION`.
    pub fn from_env() -> Self {
        Self {
            fallback_region: std::env::var(REGION_ENV).ok(),
            ..Self::default()
        }
    }

    /// Override the region reported in the LOCAL fallback.
    pub fn with_fallback_region(mut self, region: Option<String>) -> Self {
        self.fallback_region = region;
        self
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            aws_base_url: aws::DEFAULT_BASE_URL.to_string(),
            gcp_base_url: gcp::DEFAULT_BASE_URL.to_string(),
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: READ_TIMEOUT,
            fallback_region: None,
        }
    }
}

//! Health and cloud environment reporting service.
//!
//! The core of this crate answers one question: which cloud is this process
//! running in? It probes the AWS and GCP metadata services in order with short
//! timeouts and falls back to `LOCAL` when neither answers. The result is
//! computed once per process and served by a small HTTP API.
//!
//! # Features
//!
//! - AWS IMDSv2 with fallback to unauthenticated IMDSv1 requests
//! - GCP metadata server, with region derived from the zone
//! - Ordered, extensible list of provider probes
//! - Single-flight, process-lifetime caching of the result
//! - `GET /api/health` and `GET /api/hello` endpoints
//!
//! # Example
//!
//! ```ignore
//! use hello_cloud::{CloudDetector, DetectionCache, DetectorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hello_cloud::MetadataError> {
//!     let detector = CloudDetector::from_config(&DetectorConfig::from_env())?;
//!     let cache = DetectionCache::new(detector);
//!
//!     let info = cache.get().await;
//!     println!("{} {:?}", info.provider, info.region);
//!     Ok(())
//! }
//! ```
//!
//! # Provider-Specific Behavior
//!
//! | Provider | Instance id | Region | Availability zone |
//! |----------|-------------|--------|-------------------|
//! | AWS | `meta-data/instance-id` | `placement/region` | `placement/availability-zone` |
//! | GCP | `instance/id` | derived from zone | last segment of `instance/zone` |
//! | LOCAL | none | `REGION` env var | none |

mod cache;
mod client;
pub mod config;
mod detector;
mod error;
mod metadata;
mod provider;
pub mod providers;
pub mod routes;
mod state;

pub use cache::DetectionCache;
pub use client::MetadataClient;
pub use config::DetectorConfig;
pub use detector::CloudDetector;
pub use error::MetadataError;
pub use metadata::CloudInfo;
pub use provider::CloudProvider;
pub use routes::create_router;
pub use state::AppState;

//! The normalized description of the environment the process runs in.

use serde::Serialize;

use crate::provider::CloudProvider;

/// Cloud environment as reported by the detector.
///
/// The provider is always known; the remaining fields are independently
/// optional since a metadata service may expose only a subset of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudInfo {
    pub provider: CloudProvider,
    pub region: Option<String>,
    pub instance_id: Option<String>,
    pub availability_zone: Option<String>,
}

impl CloudInfo {
    /// Result used when no metadata service answered.
    pub fn local(region: Option<String>) -> Self {
        Self {
            provider: CloudProvider::Local,
            region,
            instance_id: None,
            availability_zone: None,
        }
    }
}

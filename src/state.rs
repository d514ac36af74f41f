//! Shared application state for request handlers.

use std::sync::Arc;

use crate::cache::DetectionCache;

/// Shared application state, cloneable across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub cloud: Arc<DetectionCache>,
}

impl AppState {
    pub fn new(cloud: DetectionCache) -> Self {
        Self {
            cloud: Arc::new(cloud),
        }
    }
}

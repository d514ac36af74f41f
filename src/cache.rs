//! Process-lifetime memoization of the detection result.

use tokio::sync::OnceCell;

use crate::detector::CloudDetector;
use crate::metadata::CloudInfo;

/// Runs detection once and serves the stored result afterwards.
///
/// Concurrent first callers wait on a single in-flight detection. The stored
/// value is never refreshed: the environment does not change under a running
/// process.
#[derive(Debug)]
pub struct DetectionCache {
    detector: CloudDetector,
    cell: OnceCell<CloudInfo>,
}

impl DetectionCache {
    pub fn new(detector: CloudDetector) -> Self {
        Self {
            detector,
            cell: OnceCell::new(),
        }
    }

    /// Return the cloud info, detecting it on first use.
    pub async fn get(&self) -> &CloudInfo {
        self.cell.get_or_init(|| self.detector.detect()).await
    }

    /// The stored result, if detection has already run.
    pub fn cached(&self) -> Option<&CloudInfo> {
        self.cell.get()
    }
}

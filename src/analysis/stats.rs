use serde::{Deserialize, Serialize};

use super::release::Release;

/// Release summary for one repository.
///
/// Holds values computed by
/// [`ReleaseCalculator::calculate_stats`](super::ReleaseCalculator::calculate_stats);
/// the type itself does no aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseStats {
    total_releases: usize,
    semantic_releases: usize,
    latest_release: Option<Release>,
    latest_semantic_release: Option<Release>,
    days_since_latest_release: Option<u64>,
}

impl ReleaseStats {
    pub fn new(
        total_releases: usize,
        semantic_releases: usize,
        latest_release: Option<Release>,
        latest_semantic_release: Option<Release>,
        days_since_latest_release: Option<u64>,
    ) -> Self {
        ReleaseStats {
            total_releases,
            semantic_releases,
            latest_release,
            latest_semantic_release,
            days_since_latest_release,
        }
    }

    pub fn total_releases(&self) -> usize {
        self.total_releases
    }

    pub fn semantic_releases(&self) -> usize {
        self.semantic_releases
    }

    pub fn latest_release(&self) -> Option<&Release> {
        self.latest_release.as_ref()
    }

    pub fn latest_semantic_release(&self) -> Option<&Release> {
        self.latest_semantic_release.as_ref()
    }

    pub fn days_since_latest_release(&self) -> Option<u64> {
        self.days_since_latest_release
    }

    pub fn has_releases(&self) -> bool {
        self.total_releases > 0
    }

    pub fn has_semantic_releases(&self) -> bool {
        self.semantic_releases > 0
    }
}

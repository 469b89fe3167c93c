use serde::Serialize;

use crate::repository::Repository;

/// The repository whose latest release is the freshest in the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MostRecentRelease {
    pub repository: String,
    pub tag_name: String,
    pub days_since: u64,
}

/// Organization-wide totals over a set of (possibly enriched) repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_repositories: usize,
    pub repositories_with_releases: usize,
    pub total_releases: usize,
    pub semantic_releases: usize,
    pub stale_repositories: usize,
    pub most_recent_release: Option<MostRecentRelease>,
}

impl DashboardSummary {
    /// Repositories without stats count toward the total only. A repository is
    /// stale when its latest release is more than `stale_after_days` old.
    pub fn from_repositories(repositories: &[Repository], stale_after_days: u64) -> Self {
        let mut summary = DashboardSummary {
            total_repositories: repositories.len(),
            repositories_with_releases: 0,
            total_releases: 0,
            semantic_releases: 0,
            stale_repositories: 0,
            most_recent_release: None,
        };

        for repo in repositories {
            let Some(stats) = repo.release_stats().filter(|s| s.has_releases()) else {
                continue;
            };

            summary.repositories_with_releases += 1;
            summary.total_releases += stats.total_releases();
            summary.semantic_releases += stats.semantic_releases();

            let (Some(days), Some(latest)) =
                (stats.days_since_latest_release(), stats.latest_release())
            else {
                continue;
            };

            if days > stale_after_days {
                summary.stale_repositories += 1;
            }

            let fresher = summary
                .most_recent_release
                .as_ref()
                .map_or(true, |current| days < current.days_since);
            if fresher {
                summary.most_recent_release = Some(MostRecentRelease {
                    repository: repo.name().to_string(),
                    tag_name: latest.tag_name().to_string(),
                    days_since: days,
                });
            }
        }

        summary
    }
}

pub mod generator;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::{
    DashboardSummary, MonthlyReleaseCount, Release, ReleaseCalculator, ReleaseStats,
};
use crate::config::AnalysisConfig;
use crate::enrichment::EnrichedRepository;

pub use generator::{OutputFormat, ReportGenerator};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub org: String,
    pub summary: DashboardSummary,
    pub repositories: Vec<RepositoryReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryReport {
    pub name: String,
    pub full_name: String,
    pub url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub star_count: i64,
    pub release_stats: Option<ReleaseStats>,
    pub latest_releases: Vec<Release>,
    pub recent_releases: Vec<Release>,
    pub monthly_releases: Vec<MonthlyReleaseCount>,
}

impl DashboardReport {
    /// Build the report as of `now`. Repository order is preserved.
    pub fn build(
        org: &str,
        enriched: &[EnrichedRepository],
        analysis: &AnalysisConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let repositories_only: Vec<_> = enriched.iter().map(|e| e.repository.clone()).collect();
        let summary =
            DashboardSummary::from_repositories(&repositories_only, analysis.stale_after_days);

        let repositories = enriched
            .iter()
            .map(|e| {
                let repo = &e.repository;
                RepositoryReport {
                    name: repo.name().to_string(),
                    full_name: repo.full_name(),
                    url: repo.url().to_string(),
                    description: repo.description().map(str::to_string),
                    language: repo.language().map(str::to_string),
                    star_count: repo.star_count(),
                    release_stats: repo.release_stats().cloned(),
                    latest_releases: ReleaseCalculator::get_latest_releases(
                        &e.releases,
                        analysis.latest_count,
                    ),
                    recent_releases: ReleaseCalculator::recent_releases_at(
                        &e.releases,
                        analysis.recent_window_days,
                        now,
                    ),
                    monthly_releases: ReleaseCalculator::monthly_release_counts(
                        &e.releases,
                        analysis.chart_months,
                        now,
                    ),
                }
            })
            .collect();

        DashboardReport {
            generated_at: now,
            org: org.to_string(),
            summary,
            repositories,
        }
    }
}

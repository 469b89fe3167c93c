use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::release::{days_between, Release, TagInfo};
use super::stats::ReleaseStats;

/// Release counts for one calendar month (UTC), labelled `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReleaseCount {
    pub month: String,
    pub total: usize,
    pub semantic: usize,
}

/// Stateless release analysis over tag data.
///
/// Functions that report a "latest" release trust the order of the slice
/// they are given. [`parse_tags`](Self::parse_tags) returns releases newest
/// first; pass its output (or a prefix of it) to get meaningful results.
/// Nothing here re-sorts its input.
pub struct ReleaseCalculator;

impl ReleaseCalculator {
    /// Build releases from raw tags, newest first. Equal dates keep input order.
    pub fn parse_tags(tags: Vec<TagInfo>) -> Vec<Release> {
        let mut releases: Vec<Release> = tags.into_iter().map(Release::from_tag).collect();
        releases.sort_by(|a, b| b.date().cmp(&a.date()));
        releases
    }

    pub fn filter_semantic_versions(releases: &[Release]) -> Vec<Release> {
        releases
            .iter()
            .filter(|r| r.has_semantic_version())
            .cloned()
            .collect()
    }

    /// Summarize `releases`, which must already be ordered newest first.
    pub fn calculate_stats(releases: &[Release]) -> ReleaseStats {
        Self::calculate_stats_at(releases, Utc::now())
    }

    pub fn calculate_stats_at(releases: &[Release], now: DateTime<Utc>) -> ReleaseStats {
        let Some(latest) = releases.first() else {
            return ReleaseStats::default();
        };

        let semantic = Self::filter_semantic_versions(releases);

        ReleaseStats::new(
            releases.len(),
            semantic.len(),
            Some(latest.clone()),
            semantic.into_iter().next(),
            Some(latest.days_since_at(now)),
        )
    }

    pub fn calculate_days_since(date: DateTime<Utc>) -> u64 {
        Self::calculate_days_since_at(date, Utc::now())
    }

    pub fn calculate_days_since_at(date: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
        days_between(date, now)
    }

    /// The first `count` releases of the slice, in slice order.
    pub fn get_latest_releases(releases: &[Release], count: usize) -> Vec<Release> {
        releases.iter().take(count).cloned().collect()
    }

    /// Inclusive: a release exactly `within_days` old is recent.
    pub fn is_recent_release(release: &Release, within_days: u64) -> bool {
        release.days_since() <= within_days
    }

    pub fn recent_releases(releases: &[Release], within_days: u64) -> Vec<Release> {
        Self::recent_releases_at(releases, within_days, Utc::now())
    }

    pub fn recent_releases_at(
        releases: &[Release],
        within_days: u64,
        now: DateTime<Utc>,
    ) -> Vec<Release> {
        releases
            .iter()
            .filter(|r| r.days_since_at(now) <= within_days)
            .cloned()
            .collect()
    }

    /// Per-month release counts for the `months` calendar months ending with
    /// the month of `now`, oldest first. Releases outside the window are ignored.
    pub fn monthly_release_counts(
        releases: &[Release],
        months: usize,
        now: DateTime<Utc>,
    ) -> Vec<MonthlyReleaseCount> {
        if months == 0 {
            return Vec::new();
        }

        let end = month_index(now);
        let start = end - (months as i64 - 1);

        let mut buckets: Vec<MonthlyReleaseCount> = (start..=end)
            .map(|index| MonthlyReleaseCount {
                month: month_label(index),
                total: 0,
                semantic: 0,
            })
            .collect();

        for release in releases {
            let index = month_index(release.date());
            if index < start || index > end {
                continue;
            }
            let bucket = &mut buckets[(index - start) as usize];
            bucket.total += 1;
            if release.has_semantic_version() {
                bucket.semantic += 1;
            }
        }

        buckets
    }
}

fn month_index(date: DateTime<Utc>) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

fn month_label(index: i64) -> String {
    format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
}

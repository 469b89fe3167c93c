//! Attaching release statistics to repositories.
//!
//! Each repository is enriched independently. A failed tag fetch leaves that
//! repository without stats and never affects the rest of the batch.

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::analysis::{Release, ReleaseCalculator, TagInfo};
use crate::repository::Repository;

/// Something that can list the tags of a repository.
#[async_trait]
pub trait TagSource: Send + Sync {
    async fn fetch_tags(&self, owner: &str, name: &str) -> Result<Vec<TagInfo>>;
}

/// A repository together with the releases its stats were computed from.
#[derive(Debug, Clone)]
pub struct EnrichedRepository {
    pub repository: Repository,
    /// Newest first; empty when the tag fetch failed
    pub releases: Vec<Release>,
}

/// Fetch tags for `repo` and return a copy carrying its release stats.
///
/// On fetch failure the error is logged and `repo` is returned unchanged.
pub async fn enrich_repository<S>(source: &S, repo: Repository) -> Repository
where
    S: TagSource + ?Sized,
{
    analyze_repository(source, repo).await.repository
}

/// Like [`enrich_repository`], also keeping the parsed releases.
pub async fn analyze_repository<S>(source: &S, repo: Repository) -> EnrichedRepository
where
    S: TagSource + ?Sized,
{
    match source.fetch_tags(repo.owner(), repo.name()).await {
        Ok(tags) => {
            let releases = ReleaseCalculator::parse_tags(tags);
            let stats = ReleaseCalculator::calculate_stats(&releases);
            debug!(
                repo = %repo.full_name(),
                total = stats.total_releases(),
                semantic = stats.semantic_releases(),
                "computed release stats"
            );
            EnrichedRepository {
                repository: repo.with_release_stats(stats),
                releases,
            }
        }
        Err(e) => {
            warn!(
                repo = %repo.full_name(),
                error = %e,
                "failed to fetch tags, skipping release stats"
            );
            EnrichedRepository {
                repository: repo,
                releases: Vec::new(),
            }
        }
    }
}

/// Enrich every repository with at most `concurrency` fetches in flight.
///
/// Output order matches input order.
pub async fn enrich_all<S>(
    source: &S,
    repos: Vec<Repository>,
    concurrency: usize,
) -> Vec<Repository>
where
    S: TagSource + ?Sized,
{
    analyze_all(source, repos, concurrency)
        .await
        .into_iter()
        .map(|enriched| enriched.repository)
        .collect()
}

pub async fn analyze_all<S>(
    source: &S,
    repos: Vec<Repository>,
    concurrency: usize,
) -> Vec<EnrichedRepository>
where
    S: TagSource + ?Sized,
{
    stream::iter(repos)
        .map(|repo| analyze_repository(source, repo))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::models;
use octocrab::Octocrab;
use tracing::{debug, info, warn};

use super::types::{map_repository, RepoFilter};
use crate::analysis::TagInfo;
use crate::enrichment::TagSource;
use crate::repository::Repository;

const MAX_PER_PAGE: usize = 100;

pub struct GitHubClient {
    client: Octocrab,
    org: String,
    tag_limit: usize,
}

impl GitHubClient {
    pub async fn new(token: String, org: String, api_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token);
        if let Some(url) = api_url {
            builder = builder.base_uri(url)?;
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            org,
            tag_limit: MAX_PER_PAGE,
        })
    }

    /// Cap on tags fetched per repository when used as a [`TagSource`].
    pub fn with_tag_limit(mut self, limit: usize) -> Self {
        self.tag_limit = limit;
        self
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    /// All organization repositories accepted by `filter`.
    ///
    /// Entries that fail validation are logged and skipped.
    pub async fn list_repositories(&self, filter: &RepoFilter) -> Result<Vec<Repository>> {
        let first_page = self
            .client
            .orgs(&self.org)
            .list_repos()
            .per_page(MAX_PER_PAGE as u8)
            .send()
            .await?;
        let raw_repos = self.client.all_pages(first_page).await?;
        info!(org = %self.org, count = raw_repos.len(), "listed organization repositories");

        let mut repos = Vec::new();
        for raw in raw_repos {
            let archived = raw.archived.unwrap_or(false);
            let fork = raw.fork.unwrap_or(false);
            if !filter.accepts(&raw.name, archived, fork) {
                debug!(repo = %raw.name, "filtered out");
                continue;
            }

            let name = raw.name.clone();
            match map_repository(raw, &self.org) {
                Ok(repo) => repos.push(repo),
                Err(e) => warn!(repo = %name, error = %e, "skipping invalid repository"),
            }
        }

        Ok(repos)
    }

    /// Up to `limit` tags of `owner/repo`, each dated by its commit.
    ///
    /// Tags whose commit carries no author or committer date are dropped.
    pub async fn list_tags(&self, owner: &str, repo: &str, limit: usize) -> Result<Vec<TagInfo>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut page = self
            .client
            .repos(owner, repo)
            .list_tags()
            .per_page(limit.min(MAX_PER_PAGE) as u8)
            .send()
            .await?;

        let mut raw_tags: Vec<models::repos::Tag> = Vec::new();
        loop {
            raw_tags.extend(page.items.drain(..));
            if raw_tags.len() >= limit {
                raw_tags.truncate(limit);
                break;
            }
            match self.client.get_page::<models::repos::Tag>(&page.next).await? {
                Some(next) => page = next,
                None => break,
            }
        }

        let mut tags = Vec::with_capacity(raw_tags.len());
        for tag in raw_tags {
            match self.commit_date(owner, repo, &tag.commit.sha).await? {
                Some(date) => tags.push(TagInfo::new(tag.name, date)),
                None => debug!(repo = %repo, tag = %tag.name, "tag commit has no date"),
            }
        }

        debug!(owner = %owner, repo = %repo, count = tags.len(), "fetched tags");
        Ok(tags)
    }

    async fn commit_date(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<Option<DateTime<Utc>>> {
        let commits = self
            .client
            .repos(owner, repo)
            .list_commits()
            .sha(sha)
            .per_page(1)
            .send()
            .await?;

        Ok(commits.items.into_iter().next().and_then(|commit| {
            let data = commit.commit;
            data.author
                .as_ref()
                .and_then(|a| a.date)
                .or_else(|| data.committer.as_ref().and_then(|c| c.date))
        }))
    }
}

#[async_trait]
impl TagSource for GitHubClient {
    async fn fetch_tags(&self, owner: &str, name: &str) -> Result<Vec<TagInfo>> {
        self.list_tags(owner, name, self.tag_limit).await
    }
}

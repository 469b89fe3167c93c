use chrono::Utc;
use octocrab::models;

use crate::config::ReposConfig;
use crate::error::Result;
use crate::repository::{Repository, RepositoryData};

/// Decides which organization repositories make it onto the dashboard.
#[derive(Debug, Clone, Default)]
pub struct RepoFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub include_archived: bool,
    pub include_forks: bool,
}

impl RepoFilter {
    pub fn accepts(&self, name: &str, archived: bool, fork: bool) -> bool {
        if archived && !self.include_archived {
            return false;
        }
        if fork && !self.include_forks {
            return false;
        }
        if !self.include.is_empty() && !self.include.iter().any(|n| n == name) {
            return false;
        }
        !self.exclude.iter().any(|n| n == name)
    }
}

impl From<&ReposConfig> for RepoFilter {
    fn from(config: &ReposConfig) -> Self {
        RepoFilter {
            include: config.include.clone(),
            exclude: config.exclude.clone(),
            include_archived: config.include_archived,
            include_forks: config.include_forks,
        }
    }
}

/// Convert a GitHub API repository into a validated [`Repository`].
///
/// Missing provider fields are coerced here: the owner falls back to the
/// organization being listed, absent star counts become zero and a missing
/// `updated_at` becomes the current time.
pub fn map_repository(raw: models::Repository, org: &str) -> Result<Repository> {
    let owner = raw
        .owner
        .map(|o| o.login)
        .unwrap_or_else(|| org.to_string());
    let url = raw.html_url.map(|u| u.to_string()).unwrap_or_default();
    let language = raw
        .language
        .and_then(|v| v.as_str().map(str::to_string));

    Repository::new(RepositoryData {
        name: raw.name,
        owner,
        url,
        description: raw.description,
        language,
        star_count: raw.stargazers_count.map(i64::from).unwrap_or(0),
        updated_at: raw.updated_at.unwrap_or_else(Utc::now),
    })
}

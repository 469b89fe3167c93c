use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::analysis::ReleaseStats;
use crate::error::{DashboardError, Result};

static URL_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://\S+$").expect("url pattern is valid")
});

/// Raw repository fields handed over by a data-fetching layer.
#[derive(Debug, Clone)]
pub struct RepositoryData {
    pub name: String,
    pub owner: String,
    pub url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub star_count: i64,
    pub updated_at: DateTime<Utc>,
}

/// A validated repository, optionally carrying release statistics.
///
/// Values never change after construction. Attaching statistics goes through
/// [`Repository::with_release_stats`], which returns a new repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    name: String,
    owner: String,
    url: String,
    description: Option<String>,
    language: Option<String>,
    star_count: i64,
    updated_at: DateTime<Utc>,
    release_stats: Option<ReleaseStats>,
}

impl Repository {
    pub fn new(data: RepositoryData) -> Result<Self> {
        if data.name.is_empty() || data.owner.is_empty() || data.url.is_empty() {
            return Err(DashboardError::validation(
                "Repository name, owner, and url are required",
            ));
        }
        if !URL_SCHEME.is_match(&data.url) {
            return Err(DashboardError::validation(format!(
                "Repository url must be a valid URL: {}",
                data.url
            )));
        }
        if data.star_count < 0 {
            return Err(DashboardError::validation("Star count cannot be negative"));
        }

        Ok(Repository {
            name: data.name,
            owner: data.owner,
            url: data.url,
            description: data.description,
            language: data.language,
            star_count: data.star_count,
            updated_at: data.updated_at,
            release_stats: None,
        })
    }

    /// A copy of this repository with `stats` attached, replacing any previous stats.
    pub fn with_release_stats(&self, stats: ReleaseStats) -> Self {
        Repository {
            release_stats: Some(stats),
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn star_count(&self) -> i64 {
        self.star_count
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn release_stats(&self) -> Option<&ReleaseStats> {
        self.release_stats.as_ref()
    }
}

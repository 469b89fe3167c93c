use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GithubConfig,
    pub repos: ReposConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub org: String,
    /// Alternate API root, e.g. a GitHub Enterprise host
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReposConfig {
    /// Only these repositories when non-empty
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub include_archived: bool,
    pub include_forks: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub recent_window_days: u64,
    pub stale_after_days: u64,
    pub chart_months: usize,
    pub latest_count: usize,
    /// Repositories enriched at the same time
    pub concurrency: usize,
    /// Tags fetched per repository
    pub max_tags: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub path: Option<String>,
    /// Handlebars template replacing the built-in Markdown layout
    pub template: Option<String>,
}

impl Default for ReposConfig {
    fn default() -> Self {
        ReposConfig {
            include: vec![],
            exclude: vec![],
            include_archived: false,
            include_forks: true,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            recent_window_days: 30,
            stale_after_days: 180,
            chart_months: 12,
            latest_count: 5,
            concurrency: 8,
            max_tags: 100,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: "markdown".to_string(),
            path: None,
            template: None,
        }
    }
}

pub mod types;

use std::fs;
use std::path::Path;

use crate::error::{DashboardError, Result};
pub use types::{AnalysisConfig, Config, GithubConfig, OutputConfig, ReposConfig};

/// Load configuration from a TOML file, or defaults when no path is given.
///
/// Sections and fields left out of the file keep their default values.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    if !path.exists() {
        return Err(DashboardError::config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;

    if config.analysis.chart_months > 120 {
        return Err(DashboardError::config("analysis.chart_months must be at most 120"));
    }

    Ok(config)
}

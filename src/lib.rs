pub mod analysis;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod github;
pub mod report;
pub mod repository;

pub use analysis::{Release, ReleaseCalculator, ReleaseStats, SemanticVersion, TagInfo};
pub use error::{DashboardError, Result};
pub use repository::{Repository, RepositoryData};

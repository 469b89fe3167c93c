pub mod calculator;
pub mod release;
pub mod stats;
pub mod summary;
pub mod version;

pub use calculator::{MonthlyReleaseCount, ReleaseCalculator};
pub use release::{Release, TagInfo};
pub use stats::ReleaseStats;
pub use summary::{DashboardSummary, MostRecentRelease};
pub use version::SemanticVersion;

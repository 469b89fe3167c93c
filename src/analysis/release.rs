use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::version::SemanticVersion;

/// A tag name and the date of the commit it points at, as supplied by a tag source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    pub name: String,
    pub date: DateTime<Utc>,
}

impl TagInfo {
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        TagInfo {
            name: name.into(),
            date,
        }
    }
}

/// A tag treated as release evidence.
///
/// The version is derived once when the release is built; a different tag
/// name means a different `Release`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    tag_name: String,
    date: DateTime<Utc>,
    version: Option<SemanticVersion>,
}

impl Release {
    pub fn new(
        tag_name: impl Into<String>,
        date: DateTime<Utc>,
        version: Option<SemanticVersion>,
    ) -> Self {
        Release {
            tag_name: tag_name.into(),
            date,
            version,
        }
    }

    /// Build a release from a tag, parsing its name as a version.
    pub fn from_tag(tag: TagInfo) -> Self {
        let version = SemanticVersion::parse(&tag.name);
        Release::new(tag.name, tag.date, version)
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn version(&self) -> Option<&SemanticVersion> {
        self.version.as_ref()
    }

    /// True only for parsed versions without a pre-release label.
    pub fn has_semantic_version(&self) -> bool {
        self.version.as_ref().is_some_and(SemanticVersion::is_semantic)
    }

    /// Whole days between the release date and now.
    pub fn days_since(&self) -> u64 {
        self.days_since_at(Utc::now())
    }

    pub fn days_since_at(&self, now: DateTime<Utc>) -> u64 {
        days_between(self.date, now)
    }
}

/// Absolute difference in whole days, rounded down.
pub(crate) fn days_between(date: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - date).num_days().unsigned_abs()
}

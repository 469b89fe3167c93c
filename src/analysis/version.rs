use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::DashboardError;

static SEMVER_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?([0-9]+)\.([0-9]+)\.([0-9]+)(?:-(\S+))?$")
        .expect("semver tag pattern is valid")
});

/// A `major.minor.patch[-pre]` version parsed from a tag name.
///
/// Only obtainable through [`SemanticVersion::parse`] (or the conversions
/// built on it), so every value corresponds to a tag that matched.
///
/// Components are kept as decimal digit strings without leading zeros, so
/// arbitrarily long numbers are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersion {
    major: String,
    minor: String,
    patch: String,
    pre_release: Option<String>,
}

impl SemanticVersion {
    /// Parse a tag such as `v1.2.3` or `1.0.0-beta.1`.
    ///
    /// Returns `None` for anything that is not a full three-component
    /// version. Everything after the first `-` is kept verbatim as the
    /// pre-release label.
    pub fn parse(input: &str) -> Option<Self> {
        let caps = SEMVER_TAG.captures(input)?;

        let major = normalize_component(&caps[1]);
        let minor = normalize_component(&caps[2]);
        let patch = normalize_component(&caps[3]);
        let pre_release = caps.get(4).map(|m| m.as_str().to_string());

        Some(SemanticVersion {
            major,
            minor,
            patch,
            pre_release,
        })
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    pub fn minor(&self) -> &str {
        &self.minor
    }

    pub fn patch(&self) -> &str {
        &self.patch
    }

    pub fn pre_release(&self) -> Option<&str> {
        self.pre_release.as_deref()
    }

    /// True for canonical releases, false for pre-releases.
    pub fn is_semantic(&self) -> bool {
        self.pre_release.is_none()
    }
}

fn normalize_component(digits: &str) -> String {
    match digits.trim_start_matches('0') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticVersion::parse(s).ok_or_else(|| DashboardError::invalid_version(s))
    }
}

impl TryFrom<String> for SemanticVersion {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SemanticVersion> for String {
    fn from(version: SemanticVersion) -> Self {
        version.to_string()
    }
}

//! Fix version selection for Jira issues.
//!
//! Given the fixVersions on an issue, the project's unreleased versions and
//! the pull request's base branch, decide which fixVersion the issue should
//! carry.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::{Error, Result};

/// A dotted numeric version such as `1.2.0`.
///
/// Two-part versions are accepted and completed with a zero patch number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseVersion(semver::Version);

impl ReleaseVersion {
    /// Create a version from its parts.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Extract the trailing `X.Y` of a release branch name as `X.Y.0`.
    ///
    /// `release/1.12` yields `1.12.0`.
    pub fn from_branch(branch: &str) -> Result<Self> {
        let regex = Regex::new(r"(\d+)\.(\d+)$")?;
        let caps = regex
            .captures(branch.trim())
            .ok_or_else(|| Error::InvalidVersion(branch.to_string()))?;

        let part = |i: usize| -> Result<u64> {
            caps[i]
                .parse()
                .map_err(|_| Error::InvalidVersion(branch.to_string()))
        };
        Ok(Self::new(part(1)?, part(2)?, 0))
    }

    /// Major version number.
    pub fn major(&self) -> u64 {
        self.0.major
    }

    /// Minor version number.
    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    /// Patch version number; always 0 for versions read from a branch.
    pub fn patch(&self) -> u64 {
        self.0.patch
    }
}

impl FromStr for ReleaseVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let normalized = match s.split('.').count() {
            2 => format!("{}.0", s),
            _ => s.to_string(),
        };

        let version = semver::Version::parse(&normalized)
            .map_err(|_| Error::InvalidVersion(s.to_string()))?;
        if !version.pre.is_empty() || !version.build.is_empty() {
            return Err(Error::InvalidVersion(s.to_string()));
        }
        Ok(Self(version))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of fix version selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixVersionDecision {
    /// The issue already carries the right fixVersion
    Keep(String),
    /// The issue's fixVersion must be set to `to`
    Update { from: Option<String>, to: String },
}

impl FixVersionDecision {
    /// The fixVersion the issue should end up with.
    pub fn target(&self) -> &str {
        match self {
            FixVersionDecision::Keep(v) => v,
            FixVersionDecision::Update { to, .. } => to,
        }
    }

    /// Whether the issue's fixVersion has to be written back to Jira.
    pub fn needs_update(&self) -> bool {
        matches!(self, FixVersionDecision::Update { .. })
    }
}

/// Decide the fixVersion for an issue.
///
/// * `current` - fixVersion names currently on the issue
/// * `unreleased` - unreleased version names of the project
/// * `base_branch` - the pull request's base branch
/// * `release_branches` - names of the repository's release branches
///
/// Unreleased names that are not numeric versions are ignored.
pub fn select_fix_version(
    current: &[String],
    unreleased: &[String],
    base_branch: &str,
    release_branches: &[String],
) -> Result<FixVersionDecision> {
    if current.len() > 1 {
        return Err(Error::AmbiguousFixVersion(current.len()));
    }

    let candidates = parse_versions(unreleased);
    let target = if base_branch.contains("release") {
        let wanted = ReleaseVersion::from_branch(base_branch)
            .map_err(|_| Error::ReleaseVersionNotFound(base_branch.to_string()))?;
        candidates
            .iter()
            .find(|(version, _)| *version == wanted)
            .map(|(_, name)| name.clone())
            .ok_or_else(|| Error::ReleaseVersionNotFound(wanted.to_string()))?
    } else if !release_branches.is_empty() {
        let highest = release_branches
            .iter()
            .filter_map(|branch| ReleaseVersion::from_branch(branch).ok())
            .max()
            .ok_or_else(|| {
                Error::NoFixVersionCandidate(format!(
                    "no versioned release branch in {:?}",
                    release_branches
                ))
            })?;
        log::debug!("Highest release branch version: {}", highest);

        candidates
            .iter()
            .filter(|(version, _)| *version > highest)
            .min_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, name)| name.clone())
            .ok_or_else(|| {
                Error::NoFixVersionCandidate(format!("nothing unreleased above {}", highest))
            })?
    } else {
        candidates
            .iter()
            .min_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, name)| name.clone())
            .ok_or_else(|| Error::NoFixVersionCandidate("no unreleased versions".to_string()))?
    };

    Ok(match current.first() {
        Some(existing) if *existing == target => FixVersionDecision::Keep(target),
        existing => FixVersionDecision::Update {
            from: existing.cloned(),
            to: target,
        },
    })
}

fn parse_versions(names: &[String]) -> Vec<(ReleaseVersion, String)> {
    names
        .iter()
        .filter_map(|name| match name.parse::<ReleaseVersion>() {
            Ok(version) => Some((version, name.clone())),
            Err(_) => {
                log::warn!("Skipping non-numeric version {:?}", name);
                None
            }
        })
        .collect()
}

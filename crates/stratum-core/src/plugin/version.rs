use std::fmt;
use std::str::FromStr;

use semver::{Version, VersionReq};

/// Error type for version parsing
#[derive(Debug, Clone, thiserror::Error)]
pub enum VersionError {
    #[error("invalid version format '{0}'")]
    InvalidFormat(String),
    #[error("version parse error: {0}")]
    ParseError(String),
}

/// Semantic version of the host extension API.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ApiVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The `semver::Version` equivalent, for matching against constraint
    /// ranges.
    pub fn as_semver(&self) -> Version {
        Version::new(self.major as u64, self.minor as u64, self.patch as u64)
    }

    /// Semantic-versioning compatibility: major versions must match.
    pub fn is_compatible_with(&self, other: &ApiVersion) -> bool {
        self.major == other.major
    }
}

impl FromStr for ApiVersion {
    type Err = VersionError;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        if version.split('.').count() != 3 {
            return Err(VersionError::InvalidFormat(version.to_string()));
        }

        let parsed = Version::parse(version)
            .map_err(|e| VersionError::ParseError(e.to_string()))?;
        // API versions are bare major.minor.patch; no pre-release or build
        // metadata.
        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(VersionError::InvalidFormat(version.to_string()));
        }

        let narrow = |part: u64| {
            u32::try_from(part).map_err(|_| {
                VersionError::ParseError(format!("version component {} out of range", part))
            })
        };

        Ok(Self::new(
            narrow(parsed.major)?,
            narrow(parsed.minor)?,
            narrow(parsed.patch)?,
        ))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A version requirement range using semver constraints.
#[derive(Debug, Clone)]
pub struct VersionRange {
    /// The original constraint string (e.g. "^1.2.3", ">=2.0")
    constraint: String,
    /// The parsed semver requirement
    req: VersionReq,
}

impl VersionRange {
    /// Create a new version range from a constraint string.
    pub fn from_constraint(constraint: &str) -> Result<Self, VersionError> {
        let req = VersionReq::parse(constraint).map_err(|e| {
            VersionError::ParseError(format!("invalid version constraint '{}': {}", constraint, e))
        })?;
        Ok(Self {
            constraint: constraint.to_string(),
            req,
        })
    }

    /// Check whether a specific version satisfies this range.
    pub fn includes(&self, version: &Version) -> bool {
        self.req.matches(version)
    }

    /// The original constraint string.
    pub fn constraint_string(&self) -> &str {
        &self.constraint
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.constraint)
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionRange::from_constraint(s)
    }
}

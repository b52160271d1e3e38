//! SDK and libwebrtc version types
//!
//! - [`SdkVersion`]: `X.Y.Z` or `X.Y.Z-canary.N`, backed by `semver::Version`
//! - [`LibwebrtcVersion`]: `mMAJOR.BRANCH.COMMIT.MAINT`

use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Prerelease identifier prefix for canary builds
const CANARY_PREFIX: &str = "canary.";

/// Shape shown to users when a libwebrtc version doesn't parse
pub const LIBWEBRTC_VERSION_SHAPE: &str = "m143.7499.1.0 (m<major>.<branch>.<commit>.<maint>)";

/// SDK version with an optional canary ordinal
///
/// Ordering follows semver, so `1.0.0-canary.1 < 1.0.0-canary.2 < 1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SdkVersion(semver::Version);

impl SdkVersion {
  /// Build a version from its parts
  pub fn new(major: u64, minor: u64, patch: u64, canary: Option<u64>) -> ReleaseResult<Self> {
    let mut version = semver::Version::new(major, minor, patch);
    if let Some(ordinal) = canary {
      version.pre = canary_prerelease(ordinal)?;
    }
    Ok(Self(version))
  }

  /// Canary ordinal, `None` for a plain release
  pub fn canary(&self) -> Option<u64> {
    self.0.pre.as_str().strip_prefix(CANARY_PREFIX)?.parse().ok()
  }

  /// `X.Y.Z` without the canary suffix
  #[allow(dead_code)]
  pub fn base(&self) -> String {
    format!("{}.{}.{}", self.0.major, self.0.minor, self.0.patch)
  }

  /// Next canary: `X.Y.Z` -> `X.Y.Z-canary.0`, `X.Y.Z-canary.N` -> `X.Y.Z-canary.(N+1)`
  pub fn bump_canary(&self) -> ReleaseResult<Self> {
    let next = match self.canary() {
      None => 0,
      Some(n) => n.checked_add(1).ok_or_else(|| {
        ReleaseError::message(format!("Canary ordinal of {} cannot be incremented further", self))
      })?,
    };

    let mut version = self.0.clone();
    version.pre = canary_prerelease(next)?;
    Ok(Self(version))
  }

  /// Underlying semver value
  #[allow(dead_code)]
  pub fn as_semver(&self) -> &semver::Version {
    &self.0
  }
}

fn canary_prerelease(ordinal: u64) -> ReleaseResult<semver::Prerelease> {
  semver::Prerelease::new(&format!("{}{}", CANARY_PREFIX, ordinal))
    .map_err(|e| ReleaseError::message(format!("Invalid canary prerelease: {}", e)))
}

impl fmt::Display for SdkVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for SdkVersion {
  type Err = ReleaseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || {
      ReleaseError::Config(ConfigError::InvalidVersion {
        input: s.to_string(),
        expected: "X.Y.Z or X.Y.Z-canary.N".to_string(),
      })
    };

    let version = semver::Version::parse(s).map_err(|_| invalid())?;
    if !version.build.is_empty() {
      return Err(invalid());
    }

    let pre = version.pre.as_str();
    if !pre.is_empty() {
      let ordinal = pre.strip_prefix(CANARY_PREFIX).ok_or_else(invalid)?;
      if ordinal.is_empty() || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
      }
    }

    Ok(Self(version))
  }
}

/// libwebrtc release identifier, e.g. `m143.7499.2.1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibwebrtcVersion {
  /// Chromium milestone
  pub major: u64,
  /// Chromium branch number (`branch-heads/<branch>`)
  pub branch: u64,
  /// Commit position on the branch
  pub commit: u64,
  /// Maintenance release of the build
  pub maint: u64,
  text: String,
}

impl LibwebrtcVersion {
  /// Parse a version argument; surrounding whitespace is ignored
  pub fn parse(input: &str) -> ReleaseResult<Self> {
    let invalid = || {
      ReleaseError::Config(ConfigError::InvalidVersion {
        input: input.to_string(),
        expected: LIBWEBRTC_VERSION_SHAPE.to_string(),
      })
    };

    let text = input.trim();
    let pattern = Regex::new(r"^m(\d+)\.(\d+)\.(\d+)\.(\d+)$")?;
    let caps = pattern.captures(text).ok_or_else(invalid)?;

    let component = |i: usize| -> ReleaseResult<u64> { caps[i].parse::<u64>().map_err(|_| invalid()) };

    Ok(Self {
      major: component(1)?,
      branch: component(2)?,
      commit: component(3)?,
      maint: component(4)?,
      text: text.to_string(),
    })
  }

  /// Branch name recorded in build_info.json, e.g. `M143`
  pub fn branch_name(&self) -> String {
    format!("M{}", self.major)
  }

  /// The version exactly as given (trimmed)
  pub fn as_str(&self) -> &str {
    &self.text
  }
}

impl fmt::Display for LibwebrtcVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.text)
  }
}

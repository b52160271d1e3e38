//! Canary version lines in Sora.podspec and PackageInfo.swift
//!
//! Both files are processed line by line: every line is right-trimmed, the one
//! line declaring the SDK version is parsed, and only that line is rewritten.

use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use crate::release::version::SdkVersion;
use regex::Regex;
use std::path::Path;

/// Where a version declaration lives and how it is written back
#[derive(Debug, Clone, Copy)]
pub struct VersionField {
  /// Name used in error messages
  pub name: &'static str,
  /// Substring that marks candidate lines
  pub marker: &'static str,
  /// Regex matched at the start of a candidate line
  ///
  /// Groups 1-3 are major/minor/patch, group 5 the canary ordinal.
  pattern: &'static str,
  /// Canonical replacement line for a version
  render: fn(&SdkVersion) -> String,
}

/// `s.version = "X.Y.Z"` in Sora.podspec
pub const PODSPEC_VERSION: VersionField = VersionField {
  name: "s.version",
  marker: "s.version",
  pattern: r#"^\s*s\.version\s*=\s*['"](\d+)\.(\d+)\.(\d+)(-canary\.(\d+))?['"]"#,
  render: |v| format!("  s.version = \"{}\"", v),
};

/// `public static let version = "X.Y.Z"` in Sora/PackageInfo.swift
///
/// `WebRTCInfo.version = "M95"` also contains the marker but never matches the
/// numeric pattern, so it is left alone.
pub const PACKAGE_INFO_VERSION: VersionField = VersionField {
  name: "SDKInfo.version",
  marker: "public static let version",
  pattern: r#"^\s*public\s+static\s+let\s+version\s*=\s*['"](\d+)\.(\d+)\.(\d+)(-canary\.(\d+))?['"]"#,
  render: |v| format!("    public static let version = \"{}\"", v),
};

/// A file with its version line located
#[derive(Debug, Clone)]
pub struct VersionedFile {
  /// All lines, right-trimmed
  pub lines: Vec<String>,
  /// Index of the version line
  pub line_index: usize,
  /// Version currently declared
  pub current: SdkVersion,
}

impl VersionedFile {
  /// Parse `content`, requiring exactly one version declaration
  pub fn parse(content: &str, field: &VersionField, file: &Path) -> ReleaseResult<Self> {
    let pattern = Regex::new(field.pattern)?;
    let lines: Vec<String> = content.lines().map(|l| l.trim_end().to_string()).collect();

    let mut found = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
      if !line.contains(field.marker) {
        continue;
      }
      if let Some(caps) = pattern.captures(line) {
        found.push((idx, version_from_captures(&caps, line)?));
      }
    }

    if found.len() > 1 {
      return Err(ReleaseError::Config(ConfigError::AmbiguousMarker {
        file: file.to_path_buf(),
        field: field.name.to_string(),
        count: found.len(),
      }));
    }

    let (line_index, current) = found.pop().ok_or_else(|| {
      ReleaseError::Config(ConfigError::MarkerNotFound {
        file: file.to_path_buf(),
        field: field.name.to_string(),
      })
    })?;

    tracing::debug!(file = %file.display(), line = line_index + 1, version = %current, "found version line");

    Ok(Self {
      lines,
      line_index,
      current,
    })
  }

  /// Lines with the version line replaced by the canonical declaration of `version`
  pub fn with_version(&self, field: &VersionField, version: &SdkVersion) -> Vec<String> {
    let mut lines = self.lines.clone();
    lines[self.line_index] = (field.render)(version);
    lines
  }
}

fn version_from_captures(caps: &regex::Captures<'_>, line: &str) -> ReleaseResult<SdkVersion> {
  let number = |i: usize| -> ReleaseResult<u64> {
    caps[i]
      .parse::<u64>()
      .map_err(|e| ReleaseError::message(format!("Invalid version number in '{}': {}", line, e)))
  };

  let canary = match caps.get(5) {
    Some(m) => Some(
      m.as_str()
        .parse::<u64>()
        .map_err(|e| ReleaseError::message(format!("Invalid canary ordinal in '{}': {}", line, e)))?,
    ),
    None => None,
  };

  SdkVersion::new(number(1)?, number(2)?, number(3)?, canary)
}

/// Result of bumping one file independently
#[derive(Debug, Clone)]
pub struct BumpedFile {
  pub lines: Vec<String>,
  pub previous: SdkVersion,
  pub next: SdkVersion,
}

/// Parse `content`, bump its canary version and return the rewritten lines
pub fn bump_version_line(content: &str, field: &VersionField, file: &Path) -> ReleaseResult<BumpedFile> {
  let parsed = VersionedFile::parse(content, field, file)?;
  let next = parsed.current.bump_canary()?;
  Ok(BumpedFile {
    lines: parsed.with_version(field, &next),
    previous: parsed.current,
    next,
  })
}

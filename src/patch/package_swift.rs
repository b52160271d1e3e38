use super::{keep_ends, replace_once};
use crate::core::error::ReleaseResult;
use crate::release::version::LibwebrtcVersion;
use regex::Regex;
use std::path::Path;

/// Set `let libwebrtcVersion = "..."` and the binary target's `checksum: "..."`
pub fn update_package_swift(
  content: &str,
  file: &Path,
  version: &LibwebrtcVersion,
  checksum: &str,
) -> ReleaseResult<String> {
  let version_pattern = Regex::new(r#"(let\s+libwebrtcVersion\s*=\s*")[^"]+(")"#)?;
  let updated = replace_once(content, &version_pattern, file, "libwebrtcVersion", |caps| {
    keep_ends(caps, version.as_str())
  })?;

  let checksum_pattern = Regex::new(r#"(checksum:\s*")[^"]+(")"#)?;
  replace_once(&updated, &checksum_pattern, file, "checksum", |caps| keep_ends(caps, checksum))
}

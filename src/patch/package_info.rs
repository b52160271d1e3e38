use super::{keep_ends, replace_once};
use crate::artifact::BuildInfo;
use crate::core::error::ReleaseResult;
use regex::Regex;
use std::path::Path;

/// Block whose constants describe the bundled WebRTC build
const WEBRTC_INFO_BLOCK: &str = r"public enum WebRTCInfo\s*\{";

/// Rewrite the `WebRTCInfo` constants from the artifact's build info
///
/// Each field must appear after the `public enum WebRTCInfo {` opening; an
/// identically named constant earlier in the file (e.g. `SDKInfo.version`) is
/// never touched.
pub fn update_package_info(
  content: &str,
  file: &Path,
  build_info: &BuildInfo,
  branch_number: u64,
) -> ReleaseResult<String> {
  let replacements = [
    ("version", build_info.require("branch")?),
    ("branch", branch_number.to_string()),
    ("commitPosition", build_info.require("commit")?),
    ("maintenanceVersion", build_info.require("maint")?),
    ("revision", build_info.require("revision")?),
  ];

  let mut updated = content.to_string();
  for (field, value) in &replacements {
    let pattern = Regex::new(&format!(
      r#"({}[\s\S]*?public\s+static\s+let\s+{}\s*=\s*")([^"\n]+)(")"#,
      WEBRTC_INFO_BLOCK,
      regex::escape(field)
    ))?;
    updated = replace_once(&updated, &pattern, file, field, |caps| keep_ends(caps, value))?;
  }

  Ok(updated)
}

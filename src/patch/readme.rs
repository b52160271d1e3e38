use super::replace_once;
use crate::core::error::ReleaseResult;
use regex::Regex;
use std::path::Path;

const BADGE_PATTERN: &str = r"(libwebrtc-)\d+\.\d+(-blue\.svg\)\]\(https://chromium\.googlesource\.com/external/webrtc/\+/branch-heads/)\d+(\))";

/// Point the libwebrtc badge at `<major>.<branch>` and its link at `branch-heads/<branch>`
pub fn update_readme(content: &str, file: &Path, major: u64, branch: u64) -> ReleaseResult<String> {
  let pattern = Regex::new(BADGE_PATTERN)?;
  replace_once(content, &pattern, file, "libwebrtc badge", |caps| {
    format!("{}{}.{}{}{}{}", &caps[1], major, branch, &caps[2], branch, &caps[3])
  })
}

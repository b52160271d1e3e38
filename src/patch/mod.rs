//! Marker-anchored field substitution for the files a libwebrtc update touches
//!
//! Every update follows the same rule: locate the field by a stable marker,
//! require exactly one match, replace only the captured value and leave every
//! other byte alone.
//!
//! - **package_swift**: `libwebrtcVersion` and `checksum` in Package.swift
//! - **package_info**: the `WebRTCInfo` constants in PackageInfo.swift
//! - **changes**: the libwebrtc bullet and author line in CHANGES.md
//! - **readme**: the libwebrtc badge and branch link in README.md

pub mod changes;
pub mod package_info;
pub mod package_swift;
pub mod readme;

pub use changes::update_changes_md;
pub use package_info::update_package_info;
pub use package_swift::update_package_swift;
pub use readme::update_readme;

use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use regex::{Captures, Regex};
use std::path::Path;

/// Replace the single match of `pattern` in `text`
///
/// Zero matches is [`ConfigError::MarkerNotFound`], more than one is
/// [`ConfigError::AmbiguousMarker`]; in both cases nothing is returned to write.
pub fn replace_once<F>(text: &str, pattern: &Regex, file: &Path, field: &str, mut replacement: F) -> ReleaseResult<String>
where
  F: FnMut(&Captures<'_>) -> String,
{
  let count = pattern.find_iter(text).count();
  match count {
    0 => Err(ReleaseError::Config(ConfigError::MarkerNotFound {
      file: file.to_path_buf(),
      field: field.to_string(),
    })),
    1 => {
      tracing::debug!(file = %file.display(), field, "field matched");
      Ok(pattern.replacen(text, 1, |caps: &Captures<'_>| replacement(caps)).into_owned())
    }
    count => Err(ReleaseError::Config(ConfigError::AmbiguousMarker {
      file: file.to_path_buf(),
      field: field.to_string(),
      count,
    })),
  }
}

/// Replacement for patterns shaped `(prefix)value(suffix)`: keeps both ends, swaps the middle
pub(crate) fn keep_ends(caps: &Captures<'_>, value: &str) -> String {
  let last = caps.len() - 1;
  format!("{}{}{}", &caps[1], value, &caps[last])
}

//! Utility functions for text files and cross-platform paths

use std::path::Path;

/// Convert a path to Git format (always forward slashes)
///
/// Git expects paths with forward slashes, even on Windows.
pub fn path_to_git_format(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  {
    path.to_string_lossy().replace('\\', "/")
  }
  #[cfg(not(target_os = "windows"))]
  {
    path.to_string_lossy().to_string()
  }
}

/// Append a trailing newline unless `content` already ends with one
pub fn with_trailing_newline(content: &str) -> String {
  if content.ends_with('\n') {
    content.to_string()
  } else {
    format!("{}\n", content)
  }
}

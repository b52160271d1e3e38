use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use crate::release::version::LibwebrtcVersion;
use regex::Regex;
use std::path::Path;

/// Heading new entries are inserted under
pub const DEVELOP_HEADING: &str = "## develop";

/// Author recorded when a new entry is added without `--author`
pub const PLACEHOLDER_AUTHOR: &str = "your-github-id";

fn bullet(version: &LibwebrtcVersion) -> String {
  format!("- [UPDATE] libwebrtc {} に上げる", version)
}

/// Strip whitespace and leading `@`s; `None` when nothing is left
pub fn normalize_author(author: Option<&str>) -> Option<String> {
  let name = author?.trim().trim_start_matches('@').trim();
  if name.is_empty() { None } else { Some(name.to_string()) }
}

/// Rewrite the first libwebrtc bullet in the file, or insert one under `## develop`
///
/// An existing `- [UPDATE] libwebrtc mX.Y.Z.W に上げる` line has its version
/// rewritten in place and `author` merged into the following `  - @...` line.
/// Without one, a blank line (if missing) plus a bullet/author pair is inserted
/// directly under the develop heading. The file's trailing newline is kept as is.
///
/// The bullet search covers the whole file, not just the develop section: when
/// `## develop` has no libwebrtc bullet but an earlier release section does,
/// that released bullet is the one rewritten.
pub fn update_changes_md(
  content: &str,
  file: &Path,
  version: &LibwebrtcVersion,
  author: Option<&str>,
) -> ReleaseResult<String> {
  let author = normalize_author(author);
  let entry_pattern = Regex::new(r"^- \[UPDATE\] libwebrtc [mM]\d+\.\d+\.\d+\.\d+ に上げる$")?;
  let author_line_pattern = Regex::new(r"^(\s*- @)(.+)$")?;

  let mut lines: Vec<String> = content.lines().map(String::from).collect();

  if let Some(idx) = lines.iter().position(|line| entry_pattern.is_match(line)) {
    tracing::debug!(line = idx + 1, "rewriting existing libwebrtc entry");
    lines[idx] = bullet(version);

    if let Some(author) = author {
      let author_idx = idx + 1;
      let merged = lines
        .get(author_idx)
        .and_then(|line| author_line_pattern.captures(line))
        .map(|caps| format!("{}{}", &caps[1], merge_author(&caps[2], &author)));

      match merged {
        Some(line) => lines[author_idx] = line,
        None => lines.insert(author_idx, format!("  - @{}", author)),
      }
    }
  } else {
    let develop_idx = lines
      .iter()
      .position(|line| line.trim() == DEVELOP_HEADING)
      .ok_or_else(|| {
        ReleaseError::Config(ConfigError::SectionNotFound {
          file: file.to_path_buf(),
          heading: DEVELOP_HEADING.to_string(),
        })
      })?;
    tracing::debug!(line = develop_idx + 1, "inserting new libwebrtc entry under develop");

    let mut insert_idx = develop_idx + 1;
    if lines.get(insert_idx).is_none_or(|line| !line.trim().is_empty()) {
      lines.insert(insert_idx, String::new());
    }
    insert_idx += 1;

    let author_line = format!("  - @{}", author.as_deref().unwrap_or(PLACEHOLDER_AUTHOR));
    lines.splice(insert_idx..insert_idx, [bullet(version), author_line]);
  }

  let mut updated = lines.join("\n");
  if content.ends_with('\n') {
    updated.push('\n');
  }
  Ok(updated)
}

/// Merge `author` into the handles after `- @`, returning the new handle list
///
/// The first handle has already lost its `@` to the line prefix. Handles are
/// compared without `@` and case-insensitively; a later handle that matches
/// but lacks its `@` gets one.
fn merge_author(existing: &str, author: &str) -> String {
  let mut handles: Vec<String> = existing.split_whitespace().map(String::from).collect();
  let wanted = author.to_lowercase();

  match handles
    .iter()
    .position(|h| h.trim_start_matches('@').to_lowercase() == wanted)
  {
    Some(0) => {}
    Some(i) => {
      if !handles[i].starts_with('@') {
        handles[i] = format!("@{}", handles[i]);
      }
    }
    None => handles.push(format!("@{}", author)),
  }

  handles.join(" ")
}

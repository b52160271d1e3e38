//! Writing computed file contents, or previewing them in dry-run mode

use crate::core::error::{ReleaseResult, ResultExt};
use crate::utils::with_trailing_newline;
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
  Unchanged,
  Previewed,
  Written,
}

/// One managed file: its on-disk content and the content it should have
#[derive(Debug, Clone)]
pub struct FileUpdate {
  pub path: PathBuf,
  /// Path shown to the user, relative to the repository root
  pub display: String,
  pub current: String,
  pub updated: String,
}

impl FileUpdate {
  /// Read `relative` under `root` and pair it with the result of `update`
  pub fn compute<F>(root: &Path, relative: &Path, update: F) -> ReleaseResult<Self>
  where
    F: FnOnce(&str) -> ReleaseResult<String>,
  {
    let path = root.join(relative);
    let current = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", relative.display()))?;
    let updated = update(&current)?;
    Ok(Self {
      path,
      display: relative.display().to_string(),
      current,
      updated,
    })
  }

  /// True when writing would not change the file
  pub fn is_noop(&self) -> bool {
    self.current == self.updated || self.current == with_trailing_newline(&self.updated)
  }

  /// Unified diff of the change, headed by the file path on both sides
  pub fn diff(&self) -> String {
    let patch = diffy::create_patch(&self.current, &self.updated).to_string();
    let hunks: Vec<&str> = patch.lines().skip_while(|l| l.starts_with("---") || l.starts_with("+++")).collect();
    format!("--- {0}\n+++ {0}\n{1}", self.display, hunks.join("\n"))
  }

  /// Report `No changes`, print the diff (dry run) or persist with a trailing newline
  pub fn write_or_preview(&self, dry_run: bool) -> ReleaseResult<WriteOutcome> {
    if self.is_noop() {
      println!("No changes for {}", self.display);
      return Ok(WriteOutcome::Unchanged);
    }

    if dry_run {
      println!("[dry-run] Diff for {}:", self.display);
      println!("{}", self.diff());
      return Ok(WriteOutcome::Previewed);
    }

    fs::write(&self.path, with_trailing_newline(&self.updated))
      .with_context(|| format!("Failed to write {}", self.display))?;
    tracing::debug!(path = %self.path.display(), "file written");
    println!("Updated {}", self.display);
    Ok(WriteOutcome::Written)
  }
}

/// Print `lines` as the would-be content (dry run) or write them joined by newlines
pub fn write_lines(path: &Path, display: &str, lines: &[String], dry_run: bool) -> ReleaseResult<()> {
  let content = lines.join("\n");

  if dry_run {
    println!("Dry run: The following changes would be written to {}:", display);
    println!("{}", content);
    return Ok(());
  }

  fs::write(path, with_trailing_newline(&content)).with_context(|| format!("Failed to write {}", display))?;
  tracing::debug!(path = %path.display(), "file written");
  println!("{} updated.", display);
  Ok(())
}

//! Unified release context - build once, pass everywhere
//!
//! `ReleaseContext` resolves the repository root and loads `release.toml`
//! once in main.rs; both subcommands receive it by reference.

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use std::path::{Path, PathBuf};

/// Shared state for one tool invocation
#[derive(Debug, Clone)]
pub struct ReleaseContext {
  /// Repository root (the directory the tool was started from)
  pub root: PathBuf,

  /// Loaded configuration (defaults when no release.toml exists)
  pub config: ReleaseConfig,
}

impl ReleaseContext {
  /// Build context from a root directory.
  pub fn build(root: &Path) -> ReleaseResult<Self> {
    let config = ReleaseConfig::load(root)?;
    Ok(Self {
      root: root.to_path_buf(),
      config,
    })
  }

  /// Resolve a configured relative path against the repository root
  pub fn path(&self, relative: &Path) -> PathBuf {
    self.root.join(relative)
  }
}

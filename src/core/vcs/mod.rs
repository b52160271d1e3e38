//! Repository operations used by the canary release flow
//!
//! The release logic only ever talks to [`RepoOps`]; `SystemGit` shells out to
//! the `git` binary and `DryRunRepo` prints what would run.

pub mod dry_run;
pub mod system_git;
mod system_git_ops;

pub use dry_run::DryRunRepo;
pub use system_git::SystemGit;

use crate::core::error::ReleaseResult;
use std::path::Path;

/// Remote every release push goes to
pub const RELEASE_REMOTE: &str = "origin";

/// Branch pushed alongside the canary tag
pub const RELEASE_BRANCH: &str = "develop";

/// The git operations a release needs, in the order it needs them
pub trait RepoOps {
  /// `git add <paths>`
  fn stage(&self, paths: &[&Path]) -> ReleaseResult<()>;

  /// `git commit -m <message>`
  fn commit(&self, message: &str) -> ReleaseResult<()>;

  /// `git tag <name>` (lightweight)
  fn tag(&self, name: &str) -> ReleaseResult<()>;

  /// `git push <remote> <refname>`
  fn push(&self, remote: &str, refname: &str) -> ReleaseResult<()>;
}

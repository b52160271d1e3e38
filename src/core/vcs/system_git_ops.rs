//! `RepoOps` for SystemGit (stage, commit, tag, push)

use super::RepoOps;
use super::system_git::SystemGit;
use crate::core::error::{GitError, ReleaseError, ReleaseResult};
use crate::utils::path_to_git_format;
use std::path::Path;

impl RepoOps for SystemGit {
  fn stage(&self, paths: &[&Path]) -> ReleaseResult<()> {
    let paths: Vec<String> = paths.iter().map(|p| path_to_git_format(p)).collect();
    let mut args = vec!["add"];
    args.extend(paths.iter().map(String::as_str));
    self.run(&args)?;
    Ok(())
  }

  fn commit(&self, message: &str) -> ReleaseResult<()> {
    self.run(&["commit", "-m", message])?;
    Ok(())
  }

  fn tag(&self, name: &str) -> ReleaseResult<()> {
    self.run(&["tag", name])?;
    Ok(())
  }

  fn push(&self, remote: &str, refname: &str) -> ReleaseResult<()> {
    match self.run(&["push", remote, refname]) {
      Ok(_) => Ok(()),
      Err(ReleaseError::Git(GitError::CommandFailed { stderr, .. })) => Err(ReleaseError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        refname: refname.to_string(),
        reason: stderr,
      })),
      Err(e) => Err(e),
    }
  }
}

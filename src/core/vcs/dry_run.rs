use super::RepoOps;
use crate::core::error::ReleaseResult;
use crate::utils::path_to_git_format;
use std::cell::RefCell;
use std::path::Path;

/// `RepoOps` that reports each command instead of running it
///
/// Keeps a transcript so callers (and tests) can inspect the planned commands.
#[derive(Debug, Default)]
pub struct DryRunRepo {
  transcript: RefCell<Vec<String>>,
}

impl DryRunRepo {
  pub fn new() -> Self {
    Self::default()
  }

  /// Commands that would have run, in order
  #[allow(dead_code)]
  pub fn transcript(&self) -> Vec<String> {
    self.transcript.borrow().clone()
  }

  fn report(&self, command: String) {
    println!("Dry run: Would execute {}", command);
    self.transcript.borrow_mut().push(command);
  }
}

impl RepoOps for DryRunRepo {
  fn stage(&self, paths: &[&Path]) -> ReleaseResult<()> {
    let paths: Vec<String> = paths.iter().map(|p| path_to_git_format(p)).collect();
    self.report(format!("git add {}", paths.join(" ")));
    Ok(())
  }

  fn commit(&self, message: &str) -> ReleaseResult<()> {
    self.report(format!("git commit -m '{}'", message));
    Ok(())
  }

  fn tag(&self, name: &str) -> ReleaseResult<()> {
    self.report(format!("git tag {}", name));
    Ok(())
  }

  fn push(&self, remote: &str, refname: &str) -> ReleaseResult<()> {
    self.report(format!("git push {} {}", remote, refname));
    Ok(())
  }
}

//! System git backend
//!
//! Shells out to the `git` binary. The user's environment is inherited, so
//! identity, signing, credential helpers and proxies work as they do in a
//! shell; only variables that would point git at another repository are removed.

use crate::core::error::{GitError, ReleaseError, ReleaseResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Variables that redirect git away from `repo_path` (set when running inside a hook)
const REPO_REDIRECT_ENV: &[&str] = &["GIT_DIR", "GIT_WORK_TREE", "GIT_INDEX_FILE", "GIT_COMMON_DIR"];

/// Git backend using system git
pub struct SystemGit {
  /// Repository working directory
  pub(crate) repo_path: PathBuf,

  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    let mut cmd = Command::new("git");
    for key in REPO_REDIRECT_ENV {
      cmd.env_remove(key);
    }
    let output = cmd
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .env("LC_ALL", "C")
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ReleaseError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ReleaseError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Working tree root as reported by git
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Run a git command, echoing it first, and fail on non-zero exit
  pub(crate) fn run(&self, args: &[&str]) -> ReleaseResult<Output> {
    let command = format!("git {}", args.join(" "));
    println!("Executing: {}", command);
    tracing::debug!(command = %command, repo = %self.repo_path.display(), "running git");

    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute {}", command))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command,
        stderr: stderr.trim().to_string(),
      }));
    }

    Ok(output)
  }

  /// Create a git command bound to the repository
  ///
  /// - Sets working directory to repo path
  /// - Removes [`REPO_REDIRECT_ENV`], keeps the rest of the environment
  /// - Forces C locale output and adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    for key in REPO_REDIRECT_ENV {
      cmd.env_remove(key);
    }
    cmd.env("LC_ALL", "C");

    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }
}

//! `sora-release canary`: bump the canary version, commit, tag and push

use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::core::vcs::{DryRunRepo, RELEASE_BRANCH, RELEASE_REMOTE, RepoOps, SystemGit};
use crate::release::SdkVersion;
use crate::release::apply::write_lines;
use crate::release::canary::{PACKAGE_INFO_VERSION, PODSPEC_VERSION, VersionedFile, bump_version_line};
use std::fs;
use std::path::Path;

/// Run the canary command
pub fn run_canary(ctx: &ReleaseContext, dry_run: bool) -> ReleaseResult<()> {
  let podspec = &ctx.config.canary.podspec;
  let package_info = &ctx.config.canary.package_info;

  let podspec_content =
    fs::read_to_string(ctx.path(podspec)).with_context(|| format!("Failed to read {}", podspec.display()))?;
  let package_info_content = fs::read_to_string(ctx.path(package_info))
    .with_context(|| format!("Failed to read {}", package_info.display()))?;

  // Both files are parsed before either is written
  let bumped = bump_version_line(&podspec_content, &PODSPEC_VERSION, podspec)?;
  let version = bumped.next;
  let parsed_info = VersionedFile::parse(&package_info_content, &PACKAGE_INFO_VERSION, package_info)?;
  let info_next = parsed_info.current.bump_canary()?;
  if info_next != version {
    tracing::warn!(
      podspec = %version,
      package_info = %info_next,
      "PackageInfo.swift version is out of sync with the podspec, writing {}",
      version
    );
  }
  let info_lines = parsed_info.with_version(&PACKAGE_INFO_VERSION, &version);

  tracing::debug!(from = %bumped.previous, to = %version, "bumping canary version");

  write_lines(&ctx.path(podspec), &podspec.display().to_string(), &bumped.lines, dry_run)?;
  write_lines(
    &ctx.path(package_info),
    &package_info.display().to_string(),
    &info_lines,
    dry_run,
  )?;

  let paths = [podspec.as_path(), package_info.as_path()];
  if dry_run {
    publish_canary(&DryRunRepo::new(), &paths, &version)
  } else {
    let repo = SystemGit::open(&ctx.root)?;
    tracing::debug!(work_tree = %repo.work_tree().display(), "publishing canary");
    publish_canary(&repo, &paths, &version)
  }
}

/// Commit message recorded for a canary bump
pub fn commit_message(version: &SdkVersion) -> String {
  format!("[canary] Update Sora.podspec and PackageInfo.swift version to {}", version)
}

/// Stage, commit, tag and push a canary version; stops at the first failure
pub fn publish_canary(repo: &dyn RepoOps, paths: &[&Path], version: &SdkVersion) -> ReleaseResult<()> {
  let tag = version.to_string();
  repo.stage(paths)?;
  repo.commit(&commit_message(version))?;
  repo.tag(&tag)?;
  repo.push(RELEASE_REMOTE, RELEASE_BRANCH)?;
  repo.push(RELEASE_REMOTE, &tag)?;
  Ok(())
}
